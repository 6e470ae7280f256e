//! Packline configuration (packline.toml) parsing and validation
//!
//! All build options live in an explicit config struct handed to the pipeline
//! entry points; nothing is read from the environment. CLI flags may override
//! individual fields after loading.

use crate::core::error::{ConfigError, PackError, PackResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Package descriptor copied into the output directory and required at publish
pub const PACKAGE_DESCRIPTOR: &str = "package.json";

/// Package documentation copied into the output directory and required at publish
pub const PACKAGE_DOCS: &str = "README.md";

/// Configuration for packline
/// Searched in order: packline.toml, .packline.toml, .config/packline.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackConfig {
  #[serde(default)]
  pub build: BuildConfig,
  #[serde(default)]
  pub release: ReleaseConfig,
}

/// Build pipeline options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
  /// Directory the compiler populates, relative to the project root
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  /// Whether to collapse the compiled tree into a single flat directory
  #[serde(default = "default_flatten")]
  pub flatten: bool,

  /// Compiler command; must populate the output directory or exit non-zero
  #[serde(default = "default_compiler")]
  pub compiler: String,

  /// Arguments passed to the compiler
  #[serde(default = "default_compiler_args")]
  pub compiler_args: Vec<String>,

  /// File extension of compiled module files
  #[serde(default = "default_module_extension")]
  pub module_extension: String,
}

fn default_output_dir() -> PathBuf {
  PathBuf::from("dist")
}

fn default_flatten() -> bool {
  true
}

fn default_compiler() -> String {
  "gulp".to_string()
}

fn default_compiler_args() -> Vec<String> {
  vec!["--color".to_string()]
}

fn default_module_extension() -> String {
  "js".to_string()
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      output_dir: default_output_dir(),
      flatten: default_flatten(),
      compiler: default_compiler(),
      compiler_args: default_compiler_args(),
      module_extension: default_module_extension(),
    }
  }
}

/// Release gate and registry options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// The only branch publishing is allowed from
  #[serde(default = "default_branch")]
  pub branch: String,

  /// Remote whose copy of the release branch must match the local one
  #[serde(default = "default_remote")]
  pub remote: String,

  /// Registry client command, run from inside the output directory
  #[serde(default = "default_registry")]
  pub registry: String,

  /// Arguments passed to the registry client
  #[serde(default = "default_registry_args")]
  pub registry_args: Vec<String>,
}

fn default_branch() -> String {
  "master".to_string()
}

fn default_remote() -> String {
  "origin".to_string()
}

fn default_registry() -> String {
  "npm".to_string()
}

fn default_registry_args() -> Vec<String> {
  vec!["publish".to_string()]
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      branch: default_branch(),
      remote: default_remote(),
      registry: default_registry(),
      registry_args: default_registry_args(),
    }
  }
}

impl PackConfig {
  /// Find config file in search order: packline.toml, .packline.toml, .config/packline.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("packline.toml"),
      path.join(".packline.toml"),
      path.join(".config").join("packline.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from packline.toml (searches multiple locations)
  pub fn load(path: &Path) -> PackResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      PackError::Config(ConfigError::NotFound {
        project_root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: PackConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// Load config if present, otherwise fall back to defaults
  pub fn load_or_default(path: &Path) -> PackResult<Self> {
    if Self::exists(path) { Self::load(path) } else { Ok(Self::default()) }
  }

  /// Save config to packline.toml (default location)
  pub fn save(&self, path: &Path) -> PackResult<()> {
    let config_path = path.join("packline.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }

  /// Validate configuration values
  pub fn validate(&self) -> PackResult<()> {
    if self.build.output_dir.as_os_str().is_empty() {
      return Err(PackError::Config(ConfigError::Invalid {
        field: "build.output_dir".to_string(),
        reason: "must not be empty".to_string(),
      }));
    }

    if self.build.output_dir.is_absolute() {
      return Err(PackError::Config(ConfigError::Invalid {
        field: "build.output_dir".to_string(),
        reason: "must be relative to the project root".to_string(),
      }));
    }

    let ext = &self.build.module_extension;
    if ext.is_empty() || ext.starts_with('.') || ext.contains('/') {
      return Err(PackError::Config(ConfigError::Invalid {
        field: "build.module_extension".to_string(),
        reason: format!("'{}' is not a bare extension (expected e.g. \"js\")", ext),
      }));
    }

    if self.release.branch.is_empty() {
      return Err(PackError::Config(ConfigError::Invalid {
        field: "release.branch".to_string(),
        reason: "must name the release branch".to_string(),
      }));
    }

    if self.release.remote.is_empty() {
      return Err(PackError::Config(ConfigError::Invalid {
        field: "release.remote".to_string(),
        reason: "must name the review remote".to_string(),
      }));
    }

    Ok(())
  }
}
