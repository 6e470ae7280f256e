//! Working-tree cleanliness checkpoint

use super::checkpoint::{CheckOutcome, Checkpoint, GateContext};
use crate::core::error::PackResult;
use crate::core::vcs::SystemGit;

/// The working tree must have no modified or untracked files
pub struct CleanCheck;

impl Checkpoint for CleanCheck {
  fn name(&self) -> &str {
    "clean"
  }

  fn run(&self, ctx: &GateContext) -> PackResult<CheckOutcome> {
    let repo = SystemGit::open(&ctx.project_root)?;
    let changed = repo.changed_files()?;

    if changed.is_empty() {
      return Ok(CheckOutcome::pass(self.name(), "working tree clean"));
    }

    let mut shown: Vec<&str> = changed.iter().take(5).map(String::as_str).collect();
    if changed.len() > shown.len() {
      shown.push("...");
    }

    Ok(CheckOutcome::fail(
      self.name(),
      format!("{} pending change(s): {}", changed.len(), shown.join(", ")),
    ))
  }
}
