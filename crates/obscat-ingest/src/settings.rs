//! Runtime configuration, deserialised from `config.toml` plus `OBSCAT_*`
//! environment overrides.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Root of the two-level rootname directory tree.
  pub filesystem: PathBuf,
  /// Path of the SQLite archive file.
  pub database:   PathBuf,

  /// Root of the quicklook JPEG tree. Unset disables JPEG output.
  pub jpeg_dir:      Option<PathBuf>,
  /// Root of the thumbnail tree. Unset disables thumbnail output.
  pub thumbnail_dir: Option<PathBuf>,

  /// Worker pool size for batch ingestion.
  #[serde(default = "default_workers")]
  pub workers: usize,

  /// Proposal status page URL template; `{}` stands for the proposal id.
  /// Unset disables proposal classification.
  pub proposal_status_url: Option<String>,
  #[serde(default = "default_proposal_timeout")]
  pub proposal_timeout_secs: u64,
}

fn default_workers() -> usize {
  8
}

fn default_proposal_timeout() -> u64 {
  10
}
