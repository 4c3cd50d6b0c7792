//! Command-line interface definition for bundlecfg.
//!
//! # Command Structure
//!
//! - `bundlecfg show` - Print the materialized configuration in the bundler's shape
//! - `bundlecfg check` - Validate the configuration (optionally against the filesystem)
//! - `bundlecfg init` - Write the canonical bundlecfg.toml
//! - `bundlecfg schema` - Print the JSON Schema for configuration files
//! - `bundlecfg rules` - Show the loader pipeline a file goes through

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{CheckArgs, Command, ConfigArgs, InitArgs, RulesArgs, ShowArgs};
pub use enums::*;

/// bundlecfg - typed build configuration for a JavaScript bundler
#[derive(Parser, Debug)]
#[command(
    name = "bundlecfg",
    version,
    about = "Typed build configuration for a JavaScript bundler",
    long_about = "bundlecfg loads, validates and emits the build configuration handed to a\n\
                  JavaScript module bundler: entry point, output location, dev server,\n\
                  CSS/SCSS loader chains and the HTML template plugin."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
