//! Filesystem helpers shared by the build and publish pipelines

use crate::core::error::{PackResult, ResultExt};
use std::fs;
use std::path::Path;

/// Ensure `dir` exists and is empty
///
/// Removes every entry currently inside the directory; creates the directory
/// (and parents) if it does not exist yet.
pub fn clear_dir(dir: &Path) -> PackResult<()> {
  if dir.exists() {
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
      let path = entry.context("Failed to read directory entry")?.path();
      if path.is_dir() {
        fs::remove_dir_all(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
      } else {
        fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
      }
    }
  } else {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
  }
  Ok(())
}

/// Check whether a directory has zero entries
pub fn is_dir_empty(dir: &Path) -> PackResult<bool> {
  let mut entries = fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
  Ok(entries.next().is_none())
}

/// Copy a single file from the project root into the output directory
pub fn copy_into(source: &Path, dest_dir: &Path) -> PackResult<()> {
  let name = source
    .file_name()
    .ok_or_else(|| crate::core::error::PackError::message(format!("Not a file path: {}", source.display())))?;
  fs::copy(source, dest_dir.join(name))
    .with_context(|| format!("Failed to copy {} into {}", source.display(), dest_dir.display()))?;
  Ok(())
}
