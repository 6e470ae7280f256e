//! Sequential gate runner with fail-fast semantics
//!
//! Checkpoints run in the order they were added. The first failure aborts the
//! run: later checkpoints are not informative once an earlier invariant is
//! violated, so they never execute.

use super::checkpoint::{CheckOutcome, Checkpoint, GateContext};
use crate::core::error::{GateError, PackError, PackResult};

/// Ordered list of checkpoints evaluated before publication
pub struct Gate {
  checkpoints: Vec<Box<dyn Checkpoint>>,
}

impl Gate {
  /// Create an empty gate
  pub fn new() -> Self {
    Self { checkpoints: Vec::new() }
  }

  /// Append a checkpoint; order of addition is order of evaluation
  pub fn add(&mut self, checkpoint: Box<dyn Checkpoint>) {
    self.checkpoints.push(checkpoint);
  }

  /// The release gate: branch, then clean, then sync, then artifacts
  pub fn release_gate() -> Self {
    let mut gate = Self::new();
    gate.add(Box::new(super::BranchCheck));
    gate.add(Box::new(super::CleanCheck));
    gate.add(Box::new(super::SyncCheck));
    gate.add(Box::new(super::ArtifactCheck));
    gate
  }

  /// Evaluate all checkpoints in order, stopping at the first failure
  ///
  /// Returns the passing outcomes when every invariant holds. A violated
  /// invariant becomes `GateError::CheckpointFailed`; no later checkpoint runs.
  /// Unless `quiet`, each passing checkpoint is reported as it completes.
  pub fn run(&self, ctx: &GateContext, quiet: bool) -> PackResult<Vec<CheckOutcome>> {
    let mut outcomes = Vec::new();

    for checkpoint in &self.checkpoints {
      let outcome = checkpoint.run(ctx)?;

      if !outcome.passed {
        return Err(PackError::Gate(GateError::CheckpointFailed {
          checkpoint: outcome.checkpoint,
          reason: outcome.message,
        }));
      }

      if !quiet {
        println!("   ✅ {}: {}", outcome.checkpoint, outcome.message);
      }
      outcomes.push(outcome);
    }

    Ok(outcomes)
  }

  /// Registered checkpoints, in evaluation order
  #[allow(dead_code)] // Used by tests asserting the fixed ordering
  pub fn checkpoints(&self) -> &[Box<dyn Checkpoint>] {
    &self.checkpoints
  }
}

impl Default for Gate {
  fn default() -> Self {
    Self::new()
  }
}
