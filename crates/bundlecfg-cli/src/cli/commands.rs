use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;

/// Available bundlecfg subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the materialized configuration
    ///
    /// Loads defaults, the config file, BUNDLECFG_* environment variables and
    /// command-line overrides, applies the profile for the selected mode and
    /// prints the result in the shape the bundler consumes.
    Show(ShowArgs),

    /// Validate the configuration
    ///
    /// Runs schema checks; with --fs also checks that the entry module and
    /// HTML templates exist.
    Check(CheckArgs),

    /// Write the canonical bundlecfg.toml
    Init(InitArgs),

    /// Print the JSON Schema for configuration files
    Schema,

    /// Show the loader pipeline for a file, in execution order
    Rules(RulesArgs),
}

/// Options shared by every command that loads a configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a bundlecfg.toml, bundlecfg.json or package.json
    ///
    /// Without it, the working directory is searched and the canonical
    /// configuration is used when nothing is found.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the build mode
    #[arg(short, long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Working directory to search from
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output rendition
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ShowFormat,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Also check that referenced files exist
    #[arg(long)]
    pub fs: bool,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write bundlecfg.toml into
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub dir: PathBuf,

    /// Overwrite an existing bundlecfg.toml
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the rules command
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Resource path to test against the module rules
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}
