//! Checkpoint abstraction for the release gate
//!
//! Each publication precondition implements the `Checkpoint` trait and reports
//! pass/fail with a reason. Checkpoints are evaluated strictly in order by the
//! gate runner; they never mutate anything.

use crate::core::config::ReleaseConfig;
use crate::core::error::PackResult;
use serde::Serialize;
use std::path::PathBuf;

/// Result of evaluating one checkpoint
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
  /// Name of the checkpoint that ran
  pub checkpoint: String,
  /// Whether the invariant held
  pub passed: bool,
  /// Human-readable message
  pub message: String,
}

impl CheckOutcome {
  /// Create a passing outcome
  pub fn pass(checkpoint: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      checkpoint: checkpoint.into(),
      passed: true,
      message: message.into(),
    }
  }

  /// Create a failing outcome
  pub fn fail(checkpoint: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      checkpoint: checkpoint.into(),
      passed: false,
      message: message.into(),
    }
  }
}

/// Context passed to checkpoints
#[derive(Debug, Clone)]
pub struct GateContext {
  /// Repository / project root
  pub project_root: PathBuf,
  /// Build output directory (absolute)
  pub output_dir: PathBuf,
  /// Release options (branch, remote)
  pub release: ReleaseConfig,
}

/// Publication precondition
///
/// Checkpoints are read-only predicates over the live repository and
/// filesystem; nothing is persisted between gate runs. `run` returns `Err`
/// only when the check itself could not be evaluated (e.g. git failed); a
/// violated invariant is a failing `CheckOutcome`, not an `Err`.
pub trait Checkpoint {
  /// Unique name for this checkpoint (kebab-case)
  fn name(&self) -> &str;

  /// Evaluate the invariant
  fn run(&self, ctx: &GateContext) -> PackResult<CheckOutcome>;
}
