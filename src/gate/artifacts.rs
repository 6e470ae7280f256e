//! Output-directory artifact checkpoint

use super::checkpoint::{CheckOutcome, Checkpoint, GateContext};
use crate::core::config::{PACKAGE_DESCRIPTOR, PACKAGE_DOCS};
use crate::core::error::PackResult;
use std::fs;

/// The output directory must contain the package descriptor and documentation
///
/// The descriptor must also parse as JSON and carry a name plus a semver-valid
/// version, so the registry client cannot be handed a half-built directory.
pub struct ArtifactCheck;

impl Checkpoint for ArtifactCheck {
  fn name(&self) -> &str {
    "artifacts"
  }

  fn run(&self, ctx: &GateContext) -> PackResult<CheckOutcome> {
    for required in [PACKAGE_DESCRIPTOR, PACKAGE_DOCS] {
      if !ctx.output_dir.join(required).exists() {
        return Ok(CheckOutcome::fail(
          self.name(),
          format!("{} is missing from {}", required, ctx.output_dir.display()),
        ));
      }
    }

    let descriptor_path = ctx.output_dir.join(PACKAGE_DESCRIPTOR);
    let content = fs::read_to_string(&descriptor_path)?;

    let descriptor: serde_json::Value = match serde_json::from_str(&content) {
      Ok(value) => value,
      Err(err) => {
        return Ok(CheckOutcome::fail(
          self.name(),
          format!("{} is not valid JSON: {}", PACKAGE_DESCRIPTOR, err),
        ));
      }
    };

    let Some(name) = descriptor.get("name").and_then(|v| v.as_str()) else {
      return Ok(CheckOutcome::fail(
        self.name(),
        format!("{} has no \"name\" field", PACKAGE_DESCRIPTOR),
      ));
    };

    let Some(version) = descriptor.get("version").and_then(|v| v.as_str()) else {
      return Ok(CheckOutcome::fail(
        self.name(),
        format!("{} has no \"version\" field", PACKAGE_DESCRIPTOR),
      ));
    };

    if semver::Version::parse(version).is_err() {
      return Ok(CheckOutcome::fail(
        self.name(),
        format!("{} version '{}' is not valid semver", PACKAGE_DESCRIPTOR, version),
      ));
    }

    Ok(CheckOutcome::pass(self.name(), format!("{} v{} ready to publish", name, version)))
  }
}
