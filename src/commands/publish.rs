//! Publish command implementation
//!
//! Runs the release gate checkpoints in order, then hands the output
//! directory to the registry client. The gate performs no mutation, so an
//! abort at any checkpoint needs no cleanup.

use crate::core::config::PackConfig;
use crate::core::error::{PackError, PackResult, ToolError};
use crate::gate::{Gate, GateContext};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run the publish command
pub fn run_publish(outdir: Option<PathBuf>, dry_run: bool, json: bool) -> PackResult<()> {
  let project_root = std::env::current_dir()?;

  let mut config = PackConfig::load_or_default(&project_root)?;
  if let Some(dir) = outdir {
    config.build.output_dir = dir;
  }
  config.validate()?;

  let ctx = GateContext {
    project_root: project_root.clone(),
    output_dir: project_root.join(&config.build.output_dir),
    release: config.release.clone(),
  };

  if !json {
    println!("🚦 Checking release preconditions for '{}'", config.release.branch);
  }

  let outcomes = Gate::release_gate().run(&ctx, json)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&outcomes)?);
  }

  if dry_run {
    if !json {
      println!();
      println!("🔍 Dry-run mode (registry client not invoked)");
    }
    return Ok(());
  }

  run_registry(&ctx.output_dir, &config)?;

  if !json {
    println!();
    println!("✅ Published from {}", config.build.output_dir.display());
  }

  Ok(())
}

/// Invoke the registry client from inside the output directory
fn run_registry(output_dir: &Path, config: &PackConfig) -> PackResult<()> {
  let command_line = format!("{} {}", config.release.registry, config.release.registry_args.join(" "))
    .trim()
    .to_string();
  println!("   Running registry client: {}", command_line);

  let status = Command::new(&config.release.registry)
    .args(&config.release.registry_args)
    .current_dir(output_dir)
    .status()
    .map_err(|e| {
      PackError::Tool(ToolError::Spawn {
        command: config.release.registry.clone(),
        message: e.to_string(),
      })
    })?;

  if !status.success() {
    return Err(PackError::Tool(ToolError::Failed {
      command: command_line,
      code: status.code(),
    }));
  }

  Ok(())
}
