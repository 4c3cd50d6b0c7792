//! bundlecfg CLI - load, validate and emit bundler build configuration.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - One module per subcommand
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status lines on stderr
//!
//! The configuration model itself lives in `bundlecfg-config`.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, ConfigError, Result, ResultExt};
