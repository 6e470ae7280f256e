//! Basename collision detection
//!
//! Flattening maps every module file onto its bare basename, so two files
//! sharing a basename anywhere in the tree would merge into one. The map over
//! the whole enumeration is built in a single pass before any file is touched;
//! a collision anywhere aborts the transform outright.

use crate::core::error::FlattenError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Mapping from basename to every path carrying it
pub struct CollisionMap {
  by_basename: BTreeMap<String, Vec<PathBuf>>,
}

impl CollisionMap {
  /// Build the map from the full set of module file paths
  pub fn build(files: &[PathBuf]) -> Self {
    let mut by_basename: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    for file in files {
      let basename = basename_of(file);
      by_basename.entry(basename).or_default().push(file.clone());
    }

    Self { by_basename }
  }

  /// All basenames carried by more than one path
  pub fn collisions(&self) -> impl Iterator<Item = (&String, &Vec<PathBuf>)> {
    self.by_basename.iter().filter(|(_, paths)| paths.len() > 1)
  }

  /// Error on the first collision (alphabetical by basename, so deterministic)
  pub fn ensure_unique(&self) -> Result<(), FlattenError> {
    match self.collisions().next() {
      Some((basename, paths)) => Err(FlattenError::Collision {
        basename: basename.clone(),
        paths: paths.clone(),
      }),
      None => Ok(()),
    }
  }
}

fn basename_of(path: &Path) -> String {
  path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default()
}
