//! Release integrity guard
//!
//! An ordered, fail-fast sequence of read-only checkpoints evaluated against
//! the live repository and filesystem immediately before publication:
//!
//! 1. **branch** — HEAD is on the designated release branch
//! 2. **clean** — zero modified or untracked files
//! 3. **sync** — local release branch identical to its remote counterpart
//! 4. **artifacts** — output directory carries the package metadata files
//!
//! Nothing is persisted between runs and no checkpoint mutates state, so an
//! abort needs no cleanup.

mod artifacts;
mod branch;
mod checkpoint;
mod clean;
mod runner;
mod sync;

pub use artifacts::ArtifactCheck;
pub use branch::BranchCheck;
pub use checkpoint::{CheckOutcome, Checkpoint, GateContext};
pub use clean::CleanCheck;
pub use runner::Gate;
pub use sync::SyncCheck;
