//! Remote synchronization checkpoint

use super::checkpoint::{CheckOutcome, Checkpoint, GateContext};
use crate::core::error::PackResult;
use crate::core::vcs::SystemGit;

/// The local release branch must be content-identical to its remote counterpart
///
/// Compares the local ref against the last-fetched remote ref; a stale remote
/// ref is the operator's responsibility (no implicit fetch happens here).
pub struct SyncCheck;

impl Checkpoint for SyncCheck {
  fn name(&self) -> &str {
    "sync"
  }

  fn run(&self, ctx: &GateContext) -> PackResult<CheckOutcome> {
    let repo = SystemGit::open(&ctx.project_root)?;
    let branch = &ctx.release.branch;
    let remote_ref = format!("{}/{}", ctx.release.remote, branch);

    if !repo.ref_exists(&remote_ref)? {
      return Ok(CheckOutcome::fail(
        self.name(),
        format!("remote ref '{}' not found; fetch '{}' first", remote_ref, ctx.release.remote),
      ));
    }

    let diff = repo.diff_refs(&remote_ref, branch)?;

    if diff.is_empty() {
      Ok(CheckOutcome::pass(
        self.name(),
        format!("'{}' matches '{}'", branch, remote_ref),
      ))
    } else {
      Ok(CheckOutcome::fail(
        self.name(),
        format!(
          "local '{}' differs from '{}'; push the branch through review before publishing",
          branch, remote_ref
        ),
      ))
    }
  }
}
