//! File-based config discovery and layered loading
//!
//! Sources are merged with `figment`, later ones winning:
//! canonical defaults < config file < `BUNDLECFG_*` environment < caller overrides.

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json, Serialized, Toml};
use figment::value::{Uncased, UncasedStr};
use figment::Figment;
use path_clean::PathClean;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::error::{ConfigError, Result};
use crate::mode::Mode;
use crate::paths::{resolve, ResolvedPaths};

pub const TOML_CONFIG: &str = "bundlecfg.toml";
pub const JSON_CONFIG: &str = "bundlecfg.json";
pub const PACKAGE_JSON: &str = "package.json";
/// Field of `package.json` that may hold the configuration
pub const PACKAGE_FIELD: &str = "bundlecfg";
/// Environment prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "BUNDLECFG_";
/// Keys that are camelCase in files and reachable from the environment
const CAMEL_CASE_KEYS: &[&str] = &["devServer"];

/// A materialized configuration and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: BuildConfig,
    /// File the configuration was read from, if any
    pub source: Option<PathBuf>,
    /// Directory every relative path is resolved against
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    pub fn resolve_paths(&self) -> ResolvedPaths {
        self.config.resolve_paths(&self.config_dir)
    }
}

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use bundlecfg_config::{ConfigDiscovery, Mode};
///
/// let loaded = ConfigDiscovery::new(".")
///     .with_mode(Mode::Production)
///     .load_or_default()
///     .unwrap();
/// assert!(!loaded.config.source_maps_enabled());
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    mode: Option<Mode>,
    use_env: bool,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            mode: None,
            use_env: true,
        }
    }

    /// Force the mode, overriding the file and the environment.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Ignore `BUNDLECFG_*` environment variables.
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. bundlecfg.toml
    /// 2. bundlecfg.json
    /// 3. package.json (bundlecfg field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in [TOML_CONFIG, JSON_CONFIG] {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join(PACKAGE_JSON);
        let parsed = fs::read_to_string(&pkg_path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())?;
        match parsed.get(PACKAGE_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load the discovered config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<LoadedConfig> {
        let path = self.find().ok_or_else(|| ConfigError::NotFound {
            root: self.root.clone(),
        })?;
        self.load_file(&path)
    }

    /// Load the discovered config file, or the canonical configuration when
    /// there is none. Environment and mode overrides still apply.
    pub fn load_or_default(&self) -> Result<LoadedConfig> {
        match self.find() {
            Some(path) => self.load_file(&path),
            None => {
                debug!(root = %self.root.display(), "no config file, using canonical configuration");
                let config = self.extract(self.base_figment())?;
                Ok(LoadedConfig {
                    config,
                    source: None,
                    config_dir: absolute(&self.root)?,
                })
            }
        }
    }

    /// Load a specific file. Relative paths are taken from the root.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadedConfig> {
        let path = resolve(&self.root, path.as_ref());
        if !path.is_file() {
            return Err(ConfigError::FileNotFound { path });
        }

        let figment = self.base_figment();
        let figment = if path.file_name() == Some(std::ffi::OsStr::new(PACKAGE_JSON)) {
            figment.merge(Json::string(&package_field(&path)?.to_string()))
        } else {
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file(&path)),
                Some("json") => figment.merge(Json::file(&path)),
                other => {
                    return Err(ConfigError::UnsupportedFormat(
                        other.unwrap_or("<none>").to_string(),
                    ));
                }
            }
        };

        let config = self.extract(figment)?;
        let config_dir = absolute(path.parent().unwrap_or(&self.root))?;
        info!(source = %path.display(), mode = %config.mode, "loaded configuration");

        Ok(LoadedConfig {
            config,
            source: Some(path),
            config_dir,
        })
    }

    fn base_figment(&self) -> Figment {
        Figment::from(Serialized::defaults(BuildConfig::default()))
    }

    fn extract(&self, mut figment: Figment) -> Result<BuildConfig> {
        if self.use_env {
            figment = figment.merge(
                Env::prefixed(ENV_PREFIX)
                    .split("__")
                    .map(env_key)
                    .lowercase(false),
            );
        }

        let mut config: BuildConfig = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: if e.path.is_empty() {
                "config".to_string()
            } else {
                e.path.join(".")
            },
            hint: Some(e.to_string()),
        })?;

        if let Some(mode) = self.mode {
            debug!(%mode, "mode overridden by caller");
            config.mode = mode;
        }

        config.materialize()
    }
}

/// Map an environment key path onto the file's key names. Environment
/// variables are case-insensitive, so camelCase segments are restored from
/// [`CAMEL_CASE_KEYS`] and everything else is lowercased.
fn env_key(key: &UncasedStr) -> Uncased<'_> {
    key.as_str()
        .split('.')
        .map(|segment| {
            CAMEL_CASE_KEYS
                .iter()
                .find(|known| known.eq_ignore_ascii_case(segment))
                .map(|known| known.to_string())
                .unwrap_or_else(|| segment.to_ascii_lowercase())
        })
        .collect::<Vec<_>>()
        .join(".")
        .into()
}

fn package_field(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: PACKAGE_JSON.to_string(),
        hint: Some(format!("Invalid JSON: {}", e)),
    })?;

    match parsed.get(PACKAGE_FIELD) {
        Some(field) if !field.is_null() => Ok(field.clone()),
        _ => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: Some(format!("Add a '{}' field to your package.json", PACKAGE_FIELD)),
        }),
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?.clean())
}

/// Discover and load config from the current directory, falling back to the
/// canonical configuration.
pub fn discover() -> Result<LoadedConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn env_keys_restore_camel_case() {
        let key = |raw: &str| env_key(UncasedStr::new(raw)).as_str().to_string();
        assert_eq!(key("DEVSERVER.HOST"), "devServer.host");
        assert_eq!(key("MODE"), "mode");
        assert_eq!(key("OUTPUT.FILENAME"), "output.filename");
    }

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn toml_wins_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(JSON_CONFIG), "{}").unwrap();
        fs::write(dir.path().join(TOML_CONFIG), "").unwrap();
        assert_eq!(
            ConfigDiscovery::new(dir.path()).find().unwrap(),
            dir.path().join(TOML_CONFIG)
        );
    }

    #[test]
    fn package_json_without_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), r#"{ "name": "app" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).without_env().load();
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bundlecfg.yaml"), "mode: production").unwrap();
        let result = ConfigDiscovery::new(dir.path())
            .without_env()
            .load_file("bundlecfg.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"));
    }

    #[test]
    fn missing_explicit_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path())
            .without_env()
            .load_file("nope.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
