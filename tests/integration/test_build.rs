//! Integration tests for `packline build`

use crate::helpers::{TestWorkspace, run_packline, run_packline_raw};
use anyhow::Result;

#[test]
fn test_build_flattens_nested_tree() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.stage_module("add.js", r#"var a = require("./A/a");"#)?;
  ws.stage_module("A/a.js", r#"var b = require("./B/b");"#)?;
  ws.stage_module("A/B/b.js", "module.exports = 2;")?;
  ws.stage_module("C/c.js", r#"var l = require("lodash");"#)?;

  run_packline(&ws.path, &["build"])?;

  // One file per original basename, all at depth 0
  for name in ["add.js", "a.js", "b.js", "c.js"] {
    assert!(ws.file_exists(&format!("dist/{}", name)), "dist/{} missing", name);
  }
  assert!(!ws.file_exists("dist/A"), "directory skeleton should be pruned");
  assert!(!ws.file_exists("dist/C"), "directory skeleton should be pruned");

  // References rewritten to same-directory form
  assert!(ws.read_file("dist/add.js")?.contains(r#"require("./a")"#));
  assert!(ws.read_file("dist/a.js")?.contains(r#"require("./b")"#));

  // External dependency left byte-identical
  assert!(ws.read_file("dist/c.js")?.contains(r#"require("lodash")"#));

  // Package metadata staged next to the modules
  assert!(ws.file_exists("dist/package.json"));
  assert!(ws.file_exists("dist/README.md"));

  Ok(())
}

#[test]
fn test_build_reports_rewritten_references() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.stage_module("index.js", r#"var a = require("./A/a");"#)?;
  ws.stage_module("A/a.js", "module.exports = 1;")?;

  let output = run_packline(&ws.path, &["build"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  // Every original -> rewritten pair is named for traceability
  assert!(stdout.contains("./A/a"), "should name the original reference");
  assert!(stdout.contains("./a"), "should name the rewritten reference");

  Ok(())
}

#[test]
fn test_build_aborts_on_basename_collision() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.stage_module("A/a.js", "module.exports = 1;")?;
  ws.stage_module("B/a.js", "module.exports = 2;")?;

  let output = run_packline_raw(&ws.path, &["build"])?;

  // Validation failure exit code
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("a.js"), "diagnostic should name the colliding basename");
  assert!(stderr.contains("A/a.js") && stderr.contains("B/a.js"), "diagnostic should name both paths");

  // Output directory discarded: zero files written to a flat layout
  assert_eq!(ws.entry_count("dist")?, 0);

  Ok(())
}

#[test]
fn test_build_without_flatten_keeps_nesting() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.stage_module("A/a.js", r#"var b = require("./B/b");"#)?;
  ws.stage_module("A/B/b.js", "module.exports = 2;")?;

  run_packline(&ws.path, &["build", "--no-flatten"])?;

  // Tree mirrors the compiler output; references untouched
  assert!(ws.file_exists("dist/A/a.js"));
  assert!(ws.file_exists("dist/A/B/b.js"));
  assert!(ws.read_file("dist/A/a.js")?.contains(r#"require("./B/b")"#));

  // Metadata is copied either way
  assert!(ws.file_exists("dist/package.json"));
  assert!(ws.file_exists("dist/README.md"));

  Ok(())
}

#[test]
fn test_build_clears_stale_output() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.stage_module("fresh.js", "module.exports = 1;")?;
  std::fs::create_dir_all(ws.path.join("dist"))?;
  std::fs::write(ws.path.join("dist/stale.js"), "old")?;

  run_packline(&ws.path, &["build"])?;

  assert!(!ws.file_exists("dist/stale.js"), "previous build output should be cleared");
  assert!(ws.file_exists("dist/fresh.js"));

  Ok(())
}

#[test]
fn test_build_fails_without_package_descriptor() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.stage_module("a.js", "module.exports = 1;")?;
  std::fs::remove_file(ws.path.join("package.json"))?;

  let output = run_packline_raw(&ws.path, &["build"])?;
  assert!(!output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("package.json"));

  Ok(())
}

#[test]
fn test_build_fails_when_compiler_fails() -> Result<()> {
  let ws = TestWorkspace::new()?;
  // No prebuilt/ directory: the fake compiler exits non-zero
  let output = run_packline_raw(&ws.path, &["build"])?;

  // System failure exit code; the whole pipeline stops
  assert_eq!(output.status.code(), Some(2));
  assert!(!ws.file_exists("dist/package.json"), "metadata must not be staged after a failed compile");

  Ok(())
}

#[test]
fn test_build_outdir_override() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.stage_module("a.js", "module.exports = 1;")?;
  // The fake compiler must emit into the overridden directory
  ws.write_config(
    r#"[build]
output_dir = "dist"
compiler = "cp"
compiler_args = ["-r", "prebuilt/.", "out"]

[release]
registry = "true"
registry_args = []
"#,
  )?;

  run_packline(&ws.path, &["build", "--outdir", "out"])?;

  assert!(ws.file_exists("out/a.js"));
  assert!(ws.file_exists("out/package.json"));
  assert!(!ws.file_exists("dist/a.js"));

  Ok(())
}
