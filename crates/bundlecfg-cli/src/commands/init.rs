//! Init command implementation.

use std::fs;

use bundlecfg_config::discovery::TOML_CONFIG;
use bundlecfg_config::BuildConfig;
use tracing::debug;

use crate::cli::InitArgs;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Write the canonical configuration as bundlecfg.toml.
pub fn execute(args: InitArgs) -> Result<()> {
    let path = args.dir.join(TOML_CONFIG);
    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path));
    }

    fs::create_dir_all(&args.dir).with_path(&args.dir)?;
    let contents = BuildConfig::default().to_toml()?;
    fs::write(&path, contents).with_path(&path)?;
    debug!(path = %path.display(), "wrote canonical configuration");

    ui::success(&format!("Created {}", path.display()));
    Ok(())
}
