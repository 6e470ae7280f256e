//! Version-control access for the release gate

mod system_git;

pub use system_git::SystemGit;
