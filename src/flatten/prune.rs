//! Empty directory removal after relocation
//!
//! Directories are visited deepest-first: a directory's emptiness is only
//! evaluated after every descendant has already been resolved, so `A/B/` with
//! nothing inside collapses fully (`B` first, then the now-empty `A`).

use crate::core::error::{PackResult, ResultExt};
use crate::utils::is_dir_empty;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Remove every directory under `root` that has zero entries
///
/// Returns the number of directories removed. Safe to run on an already-flat
/// tree; a second run is a no-op.
pub fn remove_empty_dirs(root: &Path) -> PackResult<usize> {
  let mut dirs: Vec<PathBuf> = Vec::new();

  for entry in WalkDir::new(root).min_depth(1) {
    let entry = entry?;
    if entry.file_type().is_dir() {
      dirs.push(entry.into_path());
    }
  }

  // Innermost first
  dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));

  let mut removed = 0;
  for dir in dirs {
    if is_dir_empty(&dir)? {
      fs::remove_dir(&dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
      removed += 1;
    }
  }

  Ok(removed)
}
