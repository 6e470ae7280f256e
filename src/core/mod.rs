//! Core building blocks shared by every packline command
//!
//! - **config**: packline.toml parsing and validation
//! - **error**: unified error type with exit codes and help messages
//! - **vcs**: git operations abstraction (SystemGit)

pub mod config;
pub mod error;
pub mod vcs;
