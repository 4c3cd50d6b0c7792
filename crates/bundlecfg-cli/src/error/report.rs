//! Miette diagnostic conversion for CLI errors.

use bundlecfg_config::ConfigError;
use miette::Report;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert ConfigError to miette Report, lifting hints into `help`
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::SchemaValidation {
            message,
            hint: Some(hint),
        } => miette::miette!(help = hint, "Invalid configuration: {}", message),
        ConfigError::InvalidValue {
            field,
            hint: Some(hint),
        } => miette::miette!(help = hint, "Invalid value for '{}'", field),
        ConfigError::NotFound { root } => miette::miette!(
            help = "Run 'bundlecfg init' to write the canonical configuration",
            "No configuration file in {}",
            root.display()
        ),
        ConfigError::EntryNotFound { path } => miette::miette!(
            help = "Check the 'entry' field; it is relative to the config directory",
            "Entry module not found: {}",
            path.display()
        ),
        ConfigError::TemplateNotFound { path } => miette::miette!(
            help = "Check the html-template plugin's 'template' field",
            "HTML template not found: {}",
            path.display()
        ),
        other => miette::miette!("Configuration error: {}", other),
    }
}
