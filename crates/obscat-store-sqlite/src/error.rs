//! Error type for `obscat-store-sqlite`.

use obscat_core::ColumnType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] obscat_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  /// A row violated a table constraint, usually the `filename` UNIQUE guard
  /// against two rootnames claiming the same file.
  #[error("constraint violation in {table} for {rootname}: {source}")]
  Constraint {
    table:    String,
    rootname: String,
    source:   rusqlite::Error,
  },

  /// A header value could not be coerced to the declared column type.
  #[error("type mismatch in {table}.{keyword}: expected {expected}, got {value:?}")]
  TypeMismatch {
    table:    String,
    keyword:  String,
    expected: ColumnType,
    value:    String,
  },

  /// A row column the destination table does not declare. Callers filter
  /// against the catalog first, so hitting this is a bug upstream.
  #[error("unknown column {column} in {table}")]
  UnknownColumn { table: String, column: String },
}

impl Error {
  /// Recoverable errors poison one row, not the whole ingest of a rootname.
  pub fn is_recoverable(&self) -> bool {
    matches!(self, Self::Constraint { .. } | Self::TypeMismatch { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
