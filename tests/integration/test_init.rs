//! Integration tests for `packline init`

use crate::helpers::{run_packline, run_packline_raw};
use anyhow::Result;
use tempfile::TempDir;

#[test]
fn test_init_writes_default_config() -> Result<()> {
  let dir = TempDir::new()?;

  run_packline(dir.path(), &["init"])?;

  let content = std::fs::read_to_string(dir.path().join("packline.toml"))?;
  assert!(content.contains("output_dir"));
  assert!(content.contains("dist"));
  assert!(content.contains("master"));

  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let dir = TempDir::new()?;
  std::fs::write(dir.path().join("packline.toml"), "[build]\noutput_dir = \"lib\"\n")?;

  let output = run_packline_raw(dir.path(), &["init"])?;
  assert!(!output.status.success());

  // Existing configuration untouched
  let content = std::fs::read_to_string(dir.path().join("packline.toml"))?;
  assert!(content.contains("lib"));

  Ok(())
}

#[test]
fn test_init_force_overwrites() -> Result<()> {
  let dir = TempDir::new()?;
  std::fs::write(dir.path().join("packline.toml"), "[build]\noutput_dir = \"lib\"\n")?;

  run_packline(dir.path(), &["init", "--force"])?;

  let content = std::fs::read_to_string(dir.path().join("packline.toml"))?;
  assert!(content.contains("dist"));

  Ok(())
}
