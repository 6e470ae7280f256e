mod commands;
mod core;
mod flatten;
mod gate;
mod ui;
mod utils;

use crate::core::error::{PackError, print_error};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flatten compiled module trees and gate package publishing
#[derive(Parser)]
#[command(name = "packline")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Write a default packline.toml configuration file
  Init {
    /// Overwrite an existing configuration file
    #[arg(long)]
    force: bool,
  },

  /// Clear the output directory, compile, flatten, and stage package metadata
  Build {
    /// Override the configured output directory
    #[arg(long)]
    outdir: Option<PathBuf>,
    /// Skip collapsing the compiled tree into a flat directory
    #[arg(long)]
    no_flatten: bool,
  },

  /// Check release preconditions, then upload from the output directory
  Publish {
    /// Override the configured output directory
    #[arg(long)]
    outdir: Option<PathBuf>,
    /// Stop after the precondition checks without invoking the registry client
    #[arg(long)]
    dry_run: bool,
    /// Output checkpoint results in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Init { force } => commands::run_init(force),
    Commands::Build { outdir, no_flatten } => commands::run_build(outdir, no_flatten),
    Commands::Publish { outdir, dry_run, json } => commands::run_publish(outdir, dry_run, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: PackError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
