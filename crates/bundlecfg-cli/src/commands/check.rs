//! Check command implementation.
//!
//! Validates the configuration without handing it to the bundler.

use bundlecfg_config::{ConfigValidator, FsValidator, SchemaValidator};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load and materialize the configuration
/// 2. Schema checks (extensions, output filename, loader chains, ...)
/// 3. With `--fs`: entry module and HTML templates exist
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let loaded = utils::load_config(&args.config)?;
    let config = &loaded.config;

    if args.fs {
        FsValidator::new(&loaded.config_dir).validate(config)?;
        let paths = loaded.resolve_paths();
        ui::success(&format!("Entry module exists: {}", paths.entry.display()));
        for template in &paths.templates {
            ui::success(&format!("Template exists: {}", template.display()));
        }
    } else {
        SchemaValidator.validate(config)?;
    }

    let source = loaded
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "canonical configuration".to_string());
    ui::success(&format!(
        "Configuration is valid ({}, mode: {}, source maps: {})",
        source,
        config.mode,
        if config.source_maps_enabled() { "on" } else { "off" }
    ));
    Ok(())
}
