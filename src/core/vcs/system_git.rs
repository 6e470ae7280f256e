//! System git backend
//!
//! Uses git plumbing commands for all repository queries:
//! - Current branch name (rev-parse --abbrev-ref)
//! - Working-tree status (status --porcelain)
//! - Ref-to-ref content diff (diff <a> <b>)
//!
//! Every subprocess runs with an isolated environment so global git
//! configuration cannot change the output format.

use crate::core::error::{GitError, PackError, PackResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// Performs one subprocess call to confirm the path is inside a work tree.
  pub fn open(path: &Path) -> PackResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(PackError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(PackError::message(format!("Failed to open git repository: {}", stderr)));
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Get current branch name
  ///
  /// Returns "HEAD" when the repository is in detached-HEAD state, which can
  /// never equal a configured release branch.
  pub fn current_branch(&self) -> PackResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--abbrev-ref", "HEAD"])
      .output()
      .context("Failed to get current branch")?;

    if !output.status.success() {
      return Ok("HEAD".to_string()); // Detached HEAD
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// List paths with pending modifications (staged, unstaged, or untracked)
  pub fn changed_files(&self) -> PackResult<Vec<String>> {
    let output = self
      .git_cmd()
      .args(["status", "--porcelain"])
      .output()
      .context("Failed to get working-tree status")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(PackError::Git(GitError::CommandFailed {
        command: "git status --porcelain".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    let files = String::from_utf8_lossy(&output.stdout)
      .lines()
      .filter(|line| line.len() > 3)
      .map(|line| line[3..].trim().to_string())
      .collect();

    Ok(files)
  }

  /// Content diff between two refs; empty output means identical trees
  pub fn diff_refs(&self, from: &str, to: &str) -> PackResult<String> {
    let output = self
      .git_cmd()
      .args(["diff", from, to])
      .output()
      .context("Failed to diff refs")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(PackError::Git(GitError::CommandFailed {
        command: format!("git diff {} {}", from, to),
        stderr: stderr.to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
  }

  /// Check whether a ref exists (e.g. "origin/master")
  pub fn ref_exists(&self, name: &str) -> PackResult<bool> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--verify", "--quiet", name])
      .output()
      .context("Failed to verify ref")?;

    Ok(output.status.success())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables, whitelisting only PATH and HOME
  /// - Forces stable output formatting regardless of user config
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("diff.noprefix=false");

    cmd
  }
}
