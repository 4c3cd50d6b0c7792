//! Schema command implementation.

use bundlecfg_config::BuildConfig;

use crate::error::Result;

/// Print the JSON Schema for configuration files to stdout.
pub fn execute() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&BuildConfig::json_schema())?);
    Ok(())
}
