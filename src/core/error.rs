//! Error types for packline with contextual messages and exit codes
//!
//! A single error enum categorizes every failure the pipeline can hit, carries
//! a human-readable diagnostic, and maps to a process exit code. Components
//! never exit the process themselves; they return `PackResult` up the call
//! chain and `main` decides the exit code and prints the diagnostic.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for packline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (git, subprocess, I/O)
  System = 2,
  /// Validation failure (collision, gate checkpoint)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for packline
#[derive(Debug)]
pub enum PackError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Flattening errors (collisions)
  Flatten(FlattenError),

  /// Release gate checkpoint failures
  Gate(GateError),

  /// External tool failures (compiler, registry client)
  Tool(ToolError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl PackError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PackError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    PackError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PackError::Message { message, context, help } => PackError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      PackError::Io(e) => PackError::Message {
        message: format!("{}: {}", ctx_str, e),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PackError::Config(_) => ExitCode::User,
      PackError::Git(_) => ExitCode::System,
      PackError::Flatten(_) => ExitCode::Validation,
      PackError::Gate(_) => ExitCode::Validation,
      PackError::Tool(_) => ExitCode::System,
      PackError::Io(_) => ExitCode::System,
      PackError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PackError::Config(e) => e.help_message(),
      PackError::Flatten(e) => e.help_message(),
      PackError::Gate(e) => e.help_message(),
      PackError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for PackError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackError::Config(e) => write!(f, "{}", e),
      PackError::Git(e) => write!(f, "{}", e),
      PackError::Flatten(e) => write!(f, "{}", e),
      PackError::Gate(e) => write!(f, "{}", e),
      PackError::Tool(e) => write!(f, "{}", e),
      PackError::Io(e) => write!(f, "I/O error: {}", e),
      PackError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PackError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PackError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for PackError {
  fn from(err: io::Error) -> Self {
    PackError::Io(err)
  }
}

impl From<String> for PackError {
  fn from(msg: String) -> Self {
    PackError::message(msg)
  }
}

impl From<&str> for PackError {
  fn from(msg: &str) -> Self {
    PackError::message(msg)
  }
}

impl From<toml_edit::TomlError> for PackError {
  fn from(err: toml_edit::TomlError) -> Self {
    PackError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for PackError {
  fn from(err: toml_edit::de::Error) -> Self {
    PackError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for PackError {
  fn from(err: toml_edit::ser::Error) -> Self {
    PackError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for PackError {
  fn from(err: serde_json::Error) -> Self {
    PackError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for PackError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    PackError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<std::path::StripPrefixError> for PackError {
  fn from(err: std::path::StripPrefixError) -> Self {
    PackError::message(format!("Path strip prefix error: {}", err))
  }
}

impl From<walkdir::Error> for PackError {
  fn from(err: walkdir::Error) -> Self {
    PackError::message(format!("Directory walk error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// packline.toml not found
  NotFound { project_root: PathBuf },

  /// A configured value failed validation
  Invalid { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `packline init` to create a configuration file.".to_string()),
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { project_root } => {
        write!(
          f,
          "No packline configuration found.\nExpected file: {}/packline.toml",
          project_root.display()
        )
      }
      ConfigError::Invalid { field, reason } => {
        write!(f, "Invalid config value for '{}': {}", field, reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Flattening errors
#[derive(Debug)]
pub enum FlattenError {
  /// Two or more module files share a basename; collapsing them into one
  /// directory would merge distinct modules
  Collision { basename: String, paths: Vec<PathBuf> },
}

impl FlattenError {
  fn help_message(&self) -> Option<String> {
    match self {
      FlattenError::Collision { basename, .. } => Some(format!(
        "Rename one of the source modules so that only a single '{}' is emitted, or disable flattening.",
        basename
      )),
    }
  }
}

impl fmt::Display for FlattenError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FlattenError::Collision { basename, paths } => {
        let joined = paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ");
        write!(
          f,
          "Flattening would collapse {} files onto the same name '{}':\n{}",
          paths.len(),
          basename,
          joined
        )
      }
    }
  }
}

/// Release gate checkpoint failures
#[derive(Debug)]
pub enum GateError {
  /// A checkpoint in the release gate failed; later checkpoints did not run
  CheckpointFailed { checkpoint: String, reason: String },
}

impl GateError {
  fn help_message(&self) -> Option<String> {
    match self {
      GateError::CheckpointFailed { checkpoint, .. } => match checkpoint.as_str() {
        "branch" => Some("Publishing runs from the release branch only. Open a pull request instead.".to_string()),
        "clean" => Some("Commit or stash pending changes, then rerun `packline publish`.".to_string()),
        "sync" => Some("Push your branch through review so local and remote match, then rerun.".to_string()),
        "artifacts" => Some("Run `packline build` to produce a complete output directory.".to_string()),
        _ => None,
      },
    }
  }
}

impl fmt::Display for GateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateError::CheckpointFailed { checkpoint, reason } => {
        write!(f, "Release gate checkpoint '{}' failed: {}", checkpoint, reason)
      }
    }
  }
}

/// External tool failures
#[derive(Debug)]
pub enum ToolError {
  /// The tool could not be spawned at all
  Spawn { command: String, message: String },

  /// The tool ran and exited with a non-zero status
  Failed { command: String, code: Option<i32> },
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolError::Spawn { command, message } => {
        write!(f, "Failed to run '{}': {}", command, message)
      }
      ToolError::Failed { command, code } => match code {
        Some(code) => write!(f, "'{}' exited with status {}", command, code),
        None => write!(f, "'{}' was terminated by a signal", command),
      },
    }
  }
}

/// Result type alias for packline
pub type PackResult<T> = Result<T, PackError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PackResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> PackResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PackError>,
{
  fn context(self, ctx: impl Into<String>) -> PackResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PackResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PackError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
