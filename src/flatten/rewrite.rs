//! Reference rewriting for the flattened layout
//!
//! Once every module sits in one directory, a nested reference like `./A/a`
//! must become the sibling reference `./a`. Single-segment paths name external
//! dependencies and pass through byte-identical. The rewrite is purely
//! textual: no check that the target exists in the flat directory — a broken
//! reference surfaces when the package is consumed, not here.

use crate::flatten::scanner::{ModuleRef, scan_references};

/// One applied reference rewrite, for traceability output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefRewrite {
  pub original: String,
  pub replacement: String,
}

/// Compute the flat-directory form of a reference path
///
/// Returns `None` when the reference must stay untouched: a single segment
/// (external dependency) or a path with an empty final segment.
pub fn rewrite_path(path: &str) -> Option<String> {
  let mut segments = path.split('/');
  let basename = segments.next_back()?;

  // Single segment: external dependency, never rewritten
  if segments.next().is_none() {
    return None;
  }

  if basename.is_empty() {
    return None;
  }

  Some(format!("./{}", basename))
}

/// Rewrite every inter-module reference in `source` to same-directory form
///
/// Replacements are applied by byte span in descending offset order so earlier
/// spans stay valid while the string shrinks or grows.
pub fn flatten_references(source: &str) -> (String, Vec<RefRewrite>) {
  let refs = scan_references(source);

  let planned: Vec<(ModuleRef, String)> = refs
    .into_iter()
    .filter_map(|r| rewrite_path(&r.path).map(|replacement| (r, replacement)))
    .collect();

  let mut rewritten = source.to_string();
  for (r, replacement) in planned.iter().rev() {
    rewritten.replace_range(r.start..r.end, replacement);
  }

  let report = planned
    .into_iter()
    .map(|(r, replacement)| RefRewrite {
      original: r.path,
      replacement,
    })
    .collect();

  (rewritten, report)
}
