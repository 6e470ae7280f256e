//! Branch identity checkpoint

use super::checkpoint::{CheckOutcome, Checkpoint, GateContext};
use crate::core::error::PackResult;
use crate::core::vcs::SystemGit;

/// The current branch must be the designated release branch
pub struct BranchCheck;

impl Checkpoint for BranchCheck {
  fn name(&self) -> &str {
    "branch"
  }

  fn run(&self, ctx: &GateContext) -> PackResult<CheckOutcome> {
    let repo = SystemGit::open(&ctx.project_root)?;
    let branch = repo.current_branch()?;

    if branch == ctx.release.branch {
      Ok(CheckOutcome::pass(self.name(), format!("on release branch '{}'", branch)))
    } else {
      Ok(CheckOutcome::fail(
        self.name(),
        format!(
          "publishing is restricted to branch '{}', but HEAD is on '{}'",
          ctx.release.branch, branch
        ),
      ))
    }
  }
}
