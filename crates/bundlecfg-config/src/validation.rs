//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for
//! library use). Anything beyond these checks is left to the bundler.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::bundle::CSS_LOADER;
use crate::config::BuildConfig;
use crate::error::{ConfigError, Result};
use crate::paths::resolve;

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use bundlecfg_config::{BuildConfig, ConfigValidator, SchemaValidator};
///
/// SchemaValidator.validate(&BuildConfig::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        if config.entry.as_os_str().is_empty() {
            return Err(ConfigError::schema(
                "entry cannot be empty",
                "Point 'entry' at the program's entry module",
            ));
        }

        let mut seen = HashSet::new();
        for ext in &config.resolve.extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(ConfigError::schema(
                    format!("resolve extension '{}' is not a file extension", ext),
                    "Extensions start with a dot, e.g. '.js'",
                ));
            }
            if !seen.insert(ext.as_str()) {
                return Err(ConfigError::schema(
                    format!("resolve extension '{}' is listed twice", ext),
                    "Remove the duplicate from 'resolve.extensions'",
                ));
            }
        }

        let filename = &config.output.filename;
        if filename.trim().is_empty() {
            return Err(ConfigError::schema(
                "output filename cannot be empty",
                "Set 'output.filename', e.g. \"bundle.js\"",
            ));
        }
        if filename.contains('/') || filename.contains('\\') {
            return Err(ConfigError::schema(
                format!("output filename '{}' contains a path separator", filename),
                "Put directories in 'output.path' instead",
            ));
        }

        if config.dev_server.host.trim().is_empty() {
            return Err(ConfigError::schema(
                "dev server host cannot be empty",
                "Use \"0.0.0.0\" to listen on every interface",
            ));
        }

        for (index, rule) in config.module.rules.iter().enumerate() {
            if rule.use_.is_empty() {
                return Err(ConfigError::schema(
                    format!("rule {} (/{}/) has no loaders", index, rule.test),
                    "Add at least one loader to 'use' or remove the rule",
                ));
            }

            for loader in &rule.use_ {
                if loader.loader.trim().is_empty() {
                    return Err(ConfigError::schema(
                        format!("rule {} (/{}/) has an unnamed loader", index, rule.test),
                        "Every loader needs a name",
                    ));
                }
            }

            if let Some(count) = rule.loader(CSS_LOADER).and_then(|l| l.import_loaders()) {
                let available = rule.expected_import_loaders() as u64;
                if count > available {
                    return Err(ConfigError::schema(
                        format!(
                            "rule {} (/{}/) sets importLoaders to {} but chains only {} other loader(s)",
                            index, rule.test, count, available
                        ),
                        format!("Use an importLoaders value of at most {}", available),
                    ));
                }
            }
        }

        for html in config.html_templates() {
            if html.template.as_os_str().is_empty() {
                return Err(ConfigError::schema(
                    "HTML template path cannot be empty",
                    "Specify the template file for the html-template plugin",
                ));
            }
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Checks that the entry module and HTML templates exist, resolving relative
/// paths against the configuration directory.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        let entry = resolve(&self.root, &config.entry);
        if !entry.is_file() {
            return Err(ConfigError::EntryNotFound { path: entry });
        }

        for html in config.html_templates() {
            let path = resolve(&self.root, &html.template);
            if !path.is_file() {
                return Err(ConfigError::TemplateNotFound { path });
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BuildConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BuildConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{CssLoaderOptions, LoaderDescriptor};

    fn assert_schema_error(config: &BuildConfig) {
        assert!(matches!(
            SchemaValidator.validate(config),
            Err(ConfigError::SchemaValidation { .. })
        ));
    }

    #[test]
    fn canonical_config_is_valid() {
        assert!(validate_schema(&BuildConfig::default()).is_ok());
    }

    #[test]
    fn rejects_extension_without_dot() {
        let mut config = BuildConfig::default();
        config.resolve.extensions.push("ts".into());
        assert_schema_error(&config);
    }

    #[test]
    fn rejects_duplicate_extension() {
        let mut config = BuildConfig::default();
        config.resolve.extensions.push(".js".into());
        assert_schema_error(&config);
    }

    #[test]
    fn rejects_filename_with_directory() {
        let mut config = BuildConfig::default();
        config.output.filename = "js/bundle.js".into();
        assert_schema_error(&config);
    }

    #[test]
    fn rejects_empty_loader_chain() {
        let mut config = BuildConfig::default();
        config.module.rules[0].use_.clear();
        assert_schema_error(&config);
    }

    #[test]
    fn rejects_import_loaders_beyond_chain() {
        let mut config = BuildConfig::default();
        config.module.rules[0].use_[1] =
            LoaderDescriptor::css(CssLoaderOptions::new(true).import_loaders(3));
        assert_schema_error(&config);
    }

    #[test]
    fn rejects_blank_host() {
        let mut config = BuildConfig::default();
        config.dev_server.host = " ".into();
        assert_schema_error(&config);
    }
}
