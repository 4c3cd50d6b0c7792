//! Helpers shared by the commands.

use std::path::{Path, PathBuf};

use bundlecfg_config::{ConfigDiscovery, LoadedConfig};
use tracing::debug;

use crate::cli::ConfigArgs;
use crate::error::Result;
use crate::ui;

/// Current working directory, or `--cwd` when given.
pub(crate) fn get_cwd(args: &ConfigArgs) -> Result<PathBuf> {
    match &args.cwd {
        Some(dir) => Ok(resolve_path(dir, &std::env::current_dir()?)),
        None => Ok(std::env::current_dir()?),
    }
}

pub(crate) fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Load the configuration the way every command sees it.
///
/// An explicit `--config` must exist. Otherwise the working directory is
/// searched, and the canonical configuration is used if nothing is there.
pub(crate) fn load_config(args: &ConfigArgs) -> Result<LoadedConfig> {
    let cwd = get_cwd(args)?;
    let mut discovery = ConfigDiscovery::new(&cwd);
    if let Some(mode) = args.mode {
        discovery = discovery.with_mode(mode.into());
    }

    let loaded = match &args.config {
        Some(path) => discovery.load_file(path)?,
        None => {
            if discovery.find().is_none() {
                ui::warning(&format!(
                    "No configuration file in {}, using the canonical configuration",
                    cwd.display()
                ));
            }
            discovery.load_or_default()?
        }
    };

    debug!(
        source = ?loaded.source,
        config_dir = %loaded.config_dir.display(),
        mode = %loaded.config.mode,
        "configuration ready"
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_keeps_absolute() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(Path::new("/etc/x"), cwd), PathBuf::from("/etc/x"));
        assert_eq!(resolve_path(Path::new("app"), cwd), PathBuf::from("/work/app"));
    }
}
