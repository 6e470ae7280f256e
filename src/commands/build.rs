//! Build command implementation
//!
//! Pipeline order: clear the output directory, invoke the compiler, flatten
//! the compiled tree (unless disabled), copy the package metadata files in.
//! The metadata files are copied after flattening and are never subject to
//! reference rewriting.

use crate::core::config::{PACKAGE_DESCRIPTOR, PACKAGE_DOCS, PackConfig};
use crate::core::error::{PackError, PackResult, ToolError};
use crate::flatten;
use crate::utils::{clear_dir, copy_into};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run the build command
pub fn run_build(outdir: Option<PathBuf>, no_flatten: bool) -> PackResult<()> {
  let project_root = std::env::current_dir()?;

  let mut config = PackConfig::load_or_default(&project_root)?;
  if let Some(dir) = outdir {
    config.build.output_dir = dir;
  }
  if no_flatten {
    config.build.flatten = false;
  }
  config.validate()?;

  let output_dir = project_root.join(&config.build.output_dir);

  println!("📦 Building into {}", config.build.output_dir.display());

  // 1. Start from an empty output directory
  clear_dir(&output_dir)?;

  // 2. Compile (external, all-or-nothing)
  run_compiler(&project_root, &config)?;

  // 3. Collapse the tree
  if config.build.flatten {
    let outcome = flatten::flatten_tree(&output_dir, &config.build.module_extension)?;
    println!(
      "   Flattened: {} module(s) relocated, {} reference(s) rewritten, {} directory(ies) removed",
      outcome.relocated, outcome.rewritten_refs, outcome.pruned_dirs
    );
  }

  // 4. Stage package metadata next to the modules
  for name in [PACKAGE_DESCRIPTOR, PACKAGE_DOCS] {
    let source = project_root.join(name);
    if !source.exists() {
      return Err(PackError::with_help(
        format!("{} not found in the project root", name),
        format!("Publishing needs {} alongside the modules; create it before building.", name),
      ));
    }
    copy_into(&source, &output_dir)?;
  }
  println!("   Copied {} and {}", PACKAGE_DESCRIPTOR, PACKAGE_DOCS);

  println!();
  println!("✅ Build complete: {}", config.build.output_dir.display());

  Ok(())
}

/// Invoke the external compiler at the project root
///
/// The compiler either populates the output directory or fails the whole
/// pipeline; nothing is consumed from it beyond the exit status.
fn run_compiler(project_root: &Path, config: &PackConfig) -> PackResult<()> {
  let command_line = format!("{} {}", config.build.compiler, config.build.compiler_args.join(" "))
    .trim()
    .to_string();
  println!("   Running compiler: {}", command_line);

  let status = Command::new(&config.build.compiler)
    .args(&config.build.compiler_args)
    .current_dir(project_root)
    .status()
    .map_err(|e| {
      PackError::Tool(ToolError::Spawn {
        command: config.build.compiler.clone(),
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
