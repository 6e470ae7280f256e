//! Init command implementation

use crate::core::config::PackConfig;
use crate::core::error::{PackError, PackResult};

/// Write a default packline.toml in the current directory
pub fn run_init(force: bool) -> PackResult<()> {
  let project_root = std::env::current_dir()?;

  if PackConfig::exists(&project_root) && !force {
    return Err(PackError::with_help(
      "A packline configuration already exists",
      "Pass --force to overwrite it with the defaults.",
    ));
  }

  PackConfig::default().save(&project_root)?;

  println!("✅ Wrote packline.toml");
  println!();
  println!("Next steps:");
  println!("  packline build      # compile and flatten into dist/");
  println!("  packline publish    # check release preconditions and upload");

  Ok(())
}
