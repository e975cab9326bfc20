//! Error type for `obscat-ingest`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] obscat_core::Error),

  #[error("header read error: {0}")]
  Fits(#[from] obscat_fits::Error),

  #[error("store error: {0}")]
  Store(#[from] obscat_store_sqlite::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("not a rootname directory: {0}")]
  NotARootnameDir(PathBuf),

  #[error("unknown filetype filter: {0:?} (expected a filetype or 'all')")]
  UnknownFilter(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
