//! Flattening transform: collapse a nested compiled tree into one directory
//!
//! Order of operations:
//! 1. Enumerate every module file under the output root
//! 2. Detect basename collisions over the whole enumeration; a collision
//!    anywhere discards the output directory and aborts before any mutation
//! 3. Per file: read, rewrite references, delete the nested original, write
//!    the result at `<root>/<basename>`
//! 4. Remove the directory skeleton left empty by relocation
//!
//! Relocation is file-by-file with no rollback: an I/O failure partway through
//! step 3 leaves the tree partially flattened.

pub mod collisions;
pub mod prune;
pub mod rewrite;
pub mod scanner;

use crate::core::error::{PackError, PackResult, ResultExt};
use crate::ui::progress::FileProgress;
use crate::utils::clear_dir;
use collisions::CollisionMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Summary of a completed flattening run
#[derive(Debug, Clone, Copy)]
pub struct FlattenOutcome {
  /// Module files relocated to the output root
  pub relocated: usize,
  /// Inter-module references rewritten across all files
  pub rewritten_refs: usize,
  /// Directories removed by pruning
  pub pruned_dirs: usize,
}

/// Collapse the compiled tree under `output_dir` into a single flat directory
pub fn flatten_tree(output_dir: &Path, extension: &str) -> PackResult<FlattenOutcome> {
  let files = collect_module_files(output_dir, extension)?;

  // Pre-flight over the entire tree: no file is touched while a collision
  // exists anywhere, and a colliding tree is unusable output
  let map = CollisionMap::build(&files);
  if let Err(collision) = map.ensure_unique() {
    clear_dir(output_dir)?;
    return Err(PackError::Flatten(collision));
  }

  let mut progress = FileProgress::new(files.len(), "Relocating modules");
  let mut rewritten_refs = 0;

  for file in &files {
    rewritten_refs += relocate(file, output_dir)?;
    progress.inc();
  }

  let pruned_dirs = prune::remove_empty_dirs(output_dir)?;

  Ok(FlattenOutcome {
    relocated: files.len(),
    rewritten_refs,
    pruned_dirs,
  })
}

/// Enumerate module files (by extension) under the output root, at any depth
fn collect_module_files(root: &Path, extension: &str) -> PackResult<Vec<PathBuf>> {
  let mut files = Vec::new();

  for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
    let entry = entry?;
    if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == extension) {
      files.push(entry.into_path());
    }
  }

  Ok(files)
}

/// Rewrite one file's references and move it to the output root
///
/// A depth-0 file is overwritten in place; its references may still point into
/// subdirectories. Returns the number of references rewritten.
fn relocate(file: &Path, output_dir: &Path) -> PackResult<usize> {
  let source = fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

  let (content, rewrites) = rewrite::flatten_references(&source);

  let shown = file.strip_prefix(output_dir).unwrap_or(file);
  for rw in &rewrites {
    println!("   {}: {} => {}", shown.display(), rw.original, rw.replacement);
  }

  fs::remove_file(file).with_context(|| format!("Failed to remove {}", file.display()))?;

  let basename = file
    .file_name()
    .ok_or_else(|| PackError::message(format!("Not a file path: {}", file.display())))?;
  let dest = output_dir.join(basename);
  fs::write(&dest, content).with_context(|| format!("Failed to write {}", dest.display()))?;

  Ok(rewrites.len())
}
