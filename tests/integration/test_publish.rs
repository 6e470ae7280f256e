//! Integration tests for `packline publish` and its release gate

use crate::helpers::{TestWorkspace, git, run_packline, run_packline_raw};
use anyhow::Result;

/// A workspace that satisfies every checkpoint: committed history, matching
/// remote, and a freshly built output directory
fn ready_workspace() -> Result<TestWorkspace> {
  let ws = TestWorkspace::new()?;
  ws.stage_module("index.js", "module.exports = 1;")?;
  ws.commit("Initial project")?;
  ws.add_remote()?;
  run_packline(&ws.path, &["build"])?;
  Ok(ws)
}

#[test]
fn test_publish_aborts_on_non_release_branch() -> Result<()> {
  let ws = ready_workspace()?;
  git(&ws.path, &["checkout", "-b", "feature"])?;

  let output = run_packline_raw(&ws.path, &["publish", "--dry-run"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("branch"), "diagnostic should name the branch checkpoint");
  assert!(stderr.contains("feature"), "diagnostic should name the offending branch");

  // No later checkpoint ran
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(!stdout.contains("working tree clean"));

  Ok(())
}

#[test]
fn test_publish_aborts_on_dirty_tree() -> Result<()> {
  let ws = ready_workspace()?;
  std::fs::write(ws.path.join("README.md"), "# demo-sdk\n\nEdited locally.\n")?;

  let output = run_packline_raw(&ws.path, &["publish", "--dry-run"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("clean"), "diagnostic should name the clean checkpoint");
  assert!(stderr.contains("README.md"), "diagnostic should name the pending file");

  // The branch checkpoint passed before the abort
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("release branch"));

  Ok(())
}

#[test]
fn test_publish_aborts_on_diverged_remote() -> Result<()> {
  let ws = ready_workspace()?;
  std::fs::write(ws.path.join("README.md"), "# demo-sdk\n\nUnreviewed change.\n")?;
  ws.commit("Local-only change")?;

  let output = run_packline_raw(&ws.path, &["publish", "--dry-run"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("sync"), "diagnostic should name the sync checkpoint");
  assert!(stderr.contains("origin/master"), "diagnostic should name the remote ref");

  Ok(())
}

#[test]
fn test_publish_aborts_on_missing_descriptor() -> Result<()> {
  let ws = ready_workspace()?;
  std::fs::remove_file(ws.path.join("dist/package.json"))?;

  let output = run_packline_raw(&ws.path, &["publish", "--dry-run"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("artifacts"), "diagnostic should name the artifacts checkpoint");
  assert!(stderr.contains("package.json"), "diagnostic should identify the missing file");

  Ok(())
}

#[test]
fn test_publish_checkpoint_order_is_fixed() -> Result<()> {
  // Wrong branch AND dirty tree: the branch checkpoint must fail first
  let ws = ready_workspace()?;
  git(&ws.path, &["checkout", "-b", "feature"])?;
  std::fs::write(ws.path.join("README.md"), "# dirty\n")?;

  let output = run_packline_raw(&ws.path, &["publish", "--dry-run"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("branch"));
  assert!(!stderr.contains("pending change"), "the clean checkpoint must not have run");

  Ok(())
}

#[test]
fn test_publish_dry_run_stops_before_registry() -> Result<()> {
  let ws = ready_workspace()?;

  let output = run_packline(&ws.path, &["publish", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Dry-run"));
  assert!(!stdout.contains("Published"));

  Ok(())
}

#[test]
fn test_publish_succeeds_with_noop_registry() -> Result<()> {
  let ws = ready_workspace()?;

  let output = run_packline(&ws.path, &["publish"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Published"));

  Ok(())
}

#[test]
fn test_publish_fails_when_registry_fails() -> Result<()> {
  let ws = ready_workspace()?;
  ws.write_config(
    r#"[build]
output_dir = "dist"
compiler = "cp"
compiler_args = ["-r", "prebuilt/.", "dist"]

[release]
registry = "false"
registry_args = []
"#,
  )?;
  // Config change must be committed and pushed or the gate aborts first
  ws.commit("Switch registry client")?;
  git(&ws.path, &["push", "origin", "master"])?;

  let output = run_packline_raw(&ws.path, &["publish"])?;
  assert_eq!(output.status.code(), Some(2));

  Ok(())
}

#[test]
fn test_publish_json_outcomes() -> Result<()> {
  let ws = ready_workspace()?;

  let output = run_packline(&ws.path, &["publish", "--dry-run", "--json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let outcomes: serde_json::Value = serde_json::from_str(stdout.trim())?;
  let outcomes = outcomes.as_array().expect("JSON output should be an array");
  assert_eq!(outcomes.len(), 4);

  let names: Vec<&str> = outcomes
    .iter()
    .map(|o| o.get("checkpoint").and_then(|c| c.as_str()).unwrap())
    .collect();
  assert_eq!(names, vec!["branch", "clean", "sync", "artifacts"]);
  assert!(outcomes.iter().all(|o| o["passed"].as_bool() == Some(true)));

  Ok(())
}
