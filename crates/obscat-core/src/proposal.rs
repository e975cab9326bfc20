//! Proposal types — the closed vocabulary of proposal categories.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

/// The coarse category of the proposal an observation was taken under.
///
/// Scraped values outside this vocabulary are treated as classification
/// failures, never stored.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Display,
  EnumIter,
  EnumString,
  Serialize,
  Deserialize,
)]
pub enum ProposalType {
  #[strum(serialize = "CAL/ACS")]
  CalAcs,
  #[strum(serialize = "CAL/OTA")]
  CalOta,
  #[strum(serialize = "CAL/STIS")]
  CalStis,
  #[strum(serialize = "CAL/WFC3")]
  CalWfc3,
  #[strum(serialize = "ENG/ACS")]
  EngAcs,
  #[strum(serialize = "GO")]
  Go,
  #[strum(serialize = "GO/DD")]
  GoDd,
  #[strum(serialize = "GO/PAR")]
  GoPar,
  #[strum(serialize = "GTO/ACS")]
  GtoAcs,
  #[strum(serialize = "GTO/COS")]
  GtoCos,
  #[strum(serialize = "NASA")]
  Nasa,
  #[strum(serialize = "SM3/ACS")]
  Sm3Acs,
  #[strum(serialize = "SM3/ERO")]
  Sm3Ero,
  #[strum(serialize = "SM4/ACS")]
  Sm4Acs,
  #[strum(serialize = "SM4/COS")]
  Sm4Cos,
  #[strum(serialize = "SM4/ERO")]
  Sm4Ero,
  #[strum(serialize = "SNAP")]
  Snap,
}

impl ProposalType {
  pub fn parse(s: &str) -> Result<Self> {
    s.trim()
      .parse()
      .map_err(|_| Error::UnknownProposalType(s.to_string()))
  }
}
