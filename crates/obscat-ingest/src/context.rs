//! Per-rootname file inventory.

use std::{
  fs,
  path::{Path, PathBuf},
};

use obscat_core::{FileKind, Rootname};

use crate::{Error, Result};

/// One recognized observation file inside a rootname directory.
#[derive(Debug, Clone)]
pub struct ObsFile {
  pub basename: String,
  pub kind:     FileKind,
}

/// The inventory of one rootname directory.
#[derive(Debug, Clone)]
pub struct FileContext {
  pub rootname: Rootname,
  pub dir:      PathBuf,
  /// Recognized files, sorted by basename so probing is deterministic.
  pub files:    Vec<ObsFile>,
}

impl FileContext {
  /// Scan `dir`, whose name must be a full 9-character rootname.
  /// Files with unrecognized suffixes (trailer files and the like) are not
  /// ingestable and do not appear in the inventory.
  pub fn scan(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    let name = dir
      .file_name()
      .and_then(|s| s.to_str())
      .ok_or_else(|| Error::NotARootnameDir(dir.clone()))?;
    let rootname = Rootname::from_full(name)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(&dir)? {
      let entry = entry?;
      let Some(basename) = entry.file_name().to_str().map(str::to_string)
      else {
        continue;
      };
      let Some(kind) = FileKind::from_basename(&basename) else {
        continue;
      };
      files.push(ObsFile { basename, kind });
    }
    files.sort_by(|a, b| a.basename.cmp(&b.basename));

    Ok(Self { rootname, dir, files })
  }

  /// First file of `kind` in basename order.
  pub fn first_of(&self, kind: FileKind) -> Option<&ObsFile> {
    self.files.iter().find(|f| f.kind == kind)
  }

  pub fn path_of(&self, file: &ObsFile) -> PathBuf {
    self.dir.join(&file.basename)
  }

  /// Archive-relative location of this rootname directory
  /// (`<prefix>/<dirname>`).
  pub fn relative_path(&self) -> String {
    let dirname = self
      .dir
      .file_name()
      .and_then(|s| s.to_str())
      .unwrap_or_else(|| self.rootname.as_str());
    format!("{}/{}", self.rootname.prefix(), dirname)
  }
}

impl AsRef<Path> for FileContext {
  fn as_ref(&self) -> &Path {
    &self.dir
  }
}
