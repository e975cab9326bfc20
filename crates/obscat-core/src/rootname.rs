//! Rootname — the 8-character natural key shared by all files of one
//! observation — and [`TableId`], the identifier of a header table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Detector, Error, FileKind, Result};

// ─── Rootname ────────────────────────────────────────────────────────────────

/// The natural key of one observation.
///
/// On disk, rootnames appear in 9-character form with a trailing
/// exposure-identifier character (`j8cw54otq`); the database key drops that
/// trailing character. Always lowercase.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Rootname(String);

impl Rootname {
  /// Build from the already-sliced 8-character key.
  pub fn new(s: &str) -> Result<Self> {
    let s = s.trim().to_ascii_lowercase();
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_alphanumeric()) {
      Ok(Self(s))
    } else {
      Err(Error::InvalidRootname(s))
    }
  }

  /// Build from the 9-character full rootname by dropping the trailing
  /// exposure-identifier character.
  pub fn from_full(full: &str) -> Result<Self> {
    let full = full.trim();
    if full.len() < 9 {
      return Err(Error::InvalidRootname(full.to_string()));
    }
    Self::new(&full[..full.len() - 1])
  }

  /// Build from a file basename such as `j8cw54otq_raw.fits`.
  pub fn from_basename(basename: &str) -> Result<Self> {
    let full = basename
      .split('_')
      .next()
      .ok_or_else(|| Error::InvalidRootname(basename.to_string()))?;
    Self::from_full(full)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// The 4-character directory prefix the rootname lives under.
  pub fn prefix(&self) -> &str {
    &self.0[..4]
  }
}

impl fmt::Display for Rootname {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── TableId ─────────────────────────────────────────────────────────────────

/// Identifies one header table: detector × filetype × header extension.
/// Renders as the table name, e.g. `wfc_raw_0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId {
  pub detector: Detector,
  pub kind:     FileKind,
  pub ext:      u32,
}

impl TableId {
  pub fn new(detector: Detector, kind: FileKind, ext: u32) -> Self {
    Self { detector, kind, ext }
  }
}

impl fmt::Display for TableId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}_{}_{}", self.detector.table_prefix(), self.kind, self.ext)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rootname_drops_exposure_char() {
    let r = Rootname::from_full("j8cw54otq").unwrap();
    assert_eq!(r.as_str(), "j8cw54ot");
    assert_eq!(r.prefix(), "j8cw");
  }

  #[test]
  fn rootname_from_basename() {
    let r = Rootname::from_basename("j8cw54otq_raw.fits").unwrap();
    assert_eq!(r.as_str(), "j8cw54ot");
  }

  #[test]
  fn rootname_is_lowercased() {
    let r = Rootname::from_full("jAB010203").unwrap();
    assert_eq!(r.as_str(), "jab01020");
  }

  #[test]
  fn rootname_rejects_short_and_bad_input() {
    assert!(Rootname::new("short").is_err());
    assert!(Rootname::from_full("j8cw54").is_err());
    assert!(Rootname::new("j8cw/4ot").is_err());
  }

  #[test]
  fn table_id_renders_lowercase() {
    let id = TableId::new(Detector::Wfc, FileKind::Raw, 0);
    assert_eq!(id.to_string(), "wfc_raw_0");
  }
}
