//! Worklist construction: filesystem diff and explicit rootname lists.

use std::{
  collections::HashSet,
  fs,
  io::{BufRead, BufReader},
  path::{Path, PathBuf},
};

use obscat_core::Rootname;
use tracing::warn;

use crate::Result;

/// Diff the two-level archive tree (`<root>/<prefix>/<dirname>`) against the
/// set of already-ingested rootnames, returning directories not yet in the
/// database, sorted.
pub fn discover_new(
  root: &Path,
  known: &HashSet<String>,
) -> Result<Vec<PathBuf>> {
  let mut fresh = Vec::new();
  for prefix in read_dirs(root)? {
    for dir in read_dirs(&prefix)? {
      let Some(name) = dir.file_name().and_then(|s| s.to_str()) else {
        continue;
      };
      let Ok(rootname) = Rootname::from_full(name) else {
        warn!(dir = %dir.display(), "directory name is not a rootname");
        continue;
      };
      if !known.contains(rootname.as_str()) {
        fresh.push(dir);
      }
    }
  }
  fresh.sort();
  Ok(fresh)
}

fn read_dirs(path: &Path) -> Result<Vec<PathBuf>> {
  let mut dirs = Vec::new();
  for entry in fs::read_dir(path)? {
    let entry = entry?;
    if entry.file_type()?.is_dir() {
      dirs.push(entry.path());
    }
  }
  dirs.sort();
  Ok(dirs)
}

/// Resolve an explicit rootname list (one full 9-character rootname per
/// line) to directories under the archive root. Invalid lines are skipped
/// with a warning.
pub fn rootname_dirs_from_list(
  root: &Path,
  list: &Path,
) -> Result<Vec<PathBuf>> {
  let reader = BufReader::new(fs::File::open(list)?);
  let mut dirs = Vec::new();
  for line in reader.lines() {
    let line = line?;
    let name = line.trim().to_ascii_lowercase();
    if name.is_empty() {
      continue;
    }
    if Rootname::from_full(&name).is_err() {
      warn!(name = %name, "skipping invalid rootname in list");
      continue;
    }
    dirs.push(root.join(&name[..4]).join(&name));
  }
  Ok(dirs)
}
