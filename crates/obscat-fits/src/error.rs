//! Error type for `obscat-fits`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// The file does not begin with a `SIMPLE` card.
  #[error("not a FITS file")]
  NotFits,

  /// The file ended inside a header (no `END` card seen).
  #[error("truncated header in HDU {hdu}")]
  Truncated { hdu: usize },

  /// The requested extension index does not exist. Expected and common —
  /// optional extensions are present only for some exposure modes.
  #[error("extension {ext} not present ({available} HDUs)")]
  ExtensionNotPresent { ext: usize, available: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
