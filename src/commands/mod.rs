//! CLI commands for packline
//!
//! - **init**: write a default packline.toml
//! - **build**: clear, compile, flatten, stage package metadata
//! - **publish**: run the release gate, then upload via the registry client

pub mod build;
pub mod init;
pub mod publish;

pub use build::run_build;
pub use init::run_init;
pub use publish::run_publish;
