//! FileKind — the processing-stage suffix carried by every observation file.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

/// The closed set of ingestable file-suffix categories.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumIter,
  EnumString,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FileKind {
  /// Raw exposure, straight from the telemetry.
  Raw,
  /// Flat-fielded exposure.
  Flt,
  /// Flat-fielded, CTE-corrected exposure.
  Flc,
  /// Support/telemetry file.
  Spt,
  /// Drizzled (resampled) product.
  Drz,
  /// Drizzled, CTE-corrected product.
  Drc,
  /// Cosmic-ray rejected combination.
  Crj,
  /// Cosmic-ray rejected, CTE-corrected combination.
  Crc,
  /// Jitter image.
  Jif,
  /// Jitter table.
  Jit,
  /// Association file.
  Asn,
}

impl FileKind {
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownFiletype(s.to_string()))
  }

  /// Recognize the category from a file basename such as
  /// `j8cw54otq_raw.fits`. Returns `None` for anything not in the closed set.
  pub fn from_basename(basename: &str) -> Option<Self> {
    let stem = basename.strip_suffix(".fits")?;
    let suffix = stem.rsplit('_').next()?;
    suffix.parse().ok()
  }

  /// Categories that get a quicklook JPEG.
  pub fn wants_jpeg(self) -> bool {
    matches!(self, Self::Raw | Self::Flt | Self::Flc)
  }

  /// Categories that get a thumbnail.
  pub fn wants_thumbnail(self) -> bool {
    matches!(self, Self::Flt)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_basename_recognizes_suffix() {
    assert_eq!(
      FileKind::from_basename("j8cw54otq_raw.fits"),
      Some(FileKind::Raw)
    );
    assert_eq!(
      FileKind::from_basename("j8cw54010_asn.fits"),
      Some(FileKind::Asn)
    );
  }

  #[test]
  fn from_basename_rejects_unknown_suffix() {
    assert_eq!(FileKind::from_basename("j8cw54otq_trl.fits"), None);
    assert_eq!(FileKind::from_basename("j8cw54otq_raw.txt"), None);
    assert_eq!(FileKind::from_basename("noext"), None);
  }

  #[test]
  fn preview_eligibility() {
    assert!(FileKind::Raw.wants_jpeg());
    assert!(FileKind::Flt.wants_jpeg());
    assert!(FileKind::Flc.wants_jpeg());
    assert!(!FileKind::Drz.wants_jpeg());

    assert!(FileKind::Flt.wants_thumbnail());
    assert!(!FileKind::Raw.wants_thumbnail());
  }
}
