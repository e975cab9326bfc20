//! Detector — the instrument channel that produced an observation.
//!
//! Each detector exposes physically distinct header schemas, so the detector
//! selects which family of header tables a rootname is written into.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

/// The closed set of instrument channels.
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
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Detector {
  /// Wide-Field Channel.
  Wfc,
  /// High-Resolution Channel.
  Hrc,
  /// Solar-Blind Channel.
  Sbc,
}

impl Detector {
  /// Parse a detector name as it appears in primary headers (`WFC`, `hrc`,
  /// ...).
  pub fn parse(s: &str) -> Result<Self> {
    s.trim()
      .parse()
      .map_err(|_| Error::UnknownDetector(s.to_string()))
  }

  /// The lowercase form used in header table names (`wfc_raw_0`).
  pub fn table_prefix(self) -> &'static str {
    match self {
      Self::Wfc => "wfc",
      Self::Hrc => "hrc",
      Self::Sbc => "sbc",
    }
  }
}
