//! The preview generation seam.
//!
//! Deciding which files qualify and where the outputs land is pipeline
//! logic; rendering pixels is an external collaborator behind
//! [`PreviewRenderer`].

use std::{
  fs,
  path::{Path, PathBuf},
};

use tracing::debug;

use crate::Result;

/// Destination layout for quicklook products, bucketed by proposal id.
#[derive(Debug, Clone, Default)]
pub struct PreviewLayout {
  jpeg_root:      Option<PathBuf>,
  thumbnail_root: Option<PathBuf>,
}

impl PreviewLayout {
  pub fn new(
    jpeg_root: Option<PathBuf>,
    thumbnail_root: Option<PathBuf>,
  ) -> Self {
    Self { jpeg_root, thumbnail_root }
  }

  /// `<jpeg_root>/<proposid>/<stem>.jpg`, or `None` when JPEG output is
  /// disabled.
  pub fn jpeg_path(&self, proposid: u32, basename: &str) -> Option<PathBuf> {
    Some(
      self
        .jpeg_root
        .as_ref()?
        .join(proposid.to_string())
        .join(format!("{}.jpg", stem(basename))),
    )
  }

  /// `<thumbnail_root>/<proposid>/<stem>.thumb`, or `None` when disabled.
  pub fn thumbnail_path(
    &self,
    proposid: u32,
    basename: &str,
  ) -> Option<PathBuf> {
    Some(
      self
        .thumbnail_root
        .as_ref()?
        .join(proposid.to_string())
        .join(format!("{}.thumb", stem(basename))),
    )
  }
}

fn stem(basename: &str) -> &str {
  basename.strip_suffix(".fits").unwrap_or(basename)
}

/// Renders one preview product from a source file. Implementations run
/// inside blocking workers and are shared across them.
pub trait PreviewRenderer: Send + Sync {
  fn render(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// Default renderer: records the request and writes nothing.
#[derive(Debug, Default)]
pub struct DisabledPreviews;

impl PreviewRenderer for DisabledPreviews {
  fn render(&self, source: &Path, dest: &Path) -> Result<()> {
    debug!(
      source = %source.display(),
      dest = %dest.display(),
      "preview rendering disabled"
    );
    Ok(())
  }
}

/// Create the proposal bucket directory before rendering into it.
pub fn ensure_parent(dest: &Path) -> Result<()> {
  if let Some(parent) = dest.parent() {
    fs::create_dir_all(parent)?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn paths_are_bucketed_by_proposal() {
    let layout = PreviewLayout::new(
      Some(PathBuf::from("/previews/jpeg")),
      Some(PathBuf::from("/previews/thumb")),
    );
    assert_eq!(
      layout.jpeg_path(10258, "j8cw54otq_raw.fits").unwrap(),
      PathBuf::from("/previews/jpeg/10258/j8cw54otq_raw.jpg")
    );
    assert_eq!(
      layout.thumbnail_path(10258, "j8cw54otq_flt.fits").unwrap(),
      PathBuf::from("/previews/thumb/10258/j8cw54otq_flt.thumb")
    );
  }

  #[test]
  fn unset_roots_disable_output() {
    let layout = PreviewLayout::default();
    assert_eq!(layout.jpeg_path(1, "x_raw.fits"), None);
    assert_eq!(layout.thumbnail_path(1, "x_flt.fits"), None);
  }
}
