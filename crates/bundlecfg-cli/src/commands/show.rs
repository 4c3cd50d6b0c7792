//! Show command implementation.

use crate::cli::{ShowArgs, ShowFormat};
use crate::commands::utils;
use crate::error::Result;

/// Print the materialized configuration to stdout.
pub fn execute(args: ShowArgs) -> Result<()> {
    let loaded = utils::load_config(&args.config)?;
    let config = &loaded.config;

    let rendered = match args.format {
        ShowFormat::Json => {
            let value = config.to_engine_value(&loaded.config_dir)?;
            serde_json::to_string_pretty(&value)?
        }
        ShowFormat::Js => config.to_module_source()?,
        ShowFormat::Toml => config.to_toml()?,
    };

    println!("{}", rendered.trim_end());
    Ok(())
}
