//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("entry module not found: {}", .path.display())]
    EntryNotFound { path: PathBuf },

    #[error("HTML template not found: {}", .path.display())]
    TemplateNotFound { path: PathBuf },

    // Config parsing/loading errors
    #[error("no bundlecfg.toml or bundlecfg.json found in {}", .root.display())]
    NotFound { root: PathBuf },

    #[error("config file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config value for '{field}'{}", hint_suffix(.hint))]
    InvalidValue { field: String, hint: Option<String> },

    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown mode '{0}' (expected 'development' or 'production')")]
    UnknownMode(String),

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    // Schema validation errors (no filesystem checks)
    #[error("schema validation failed: {message}{}", hint_suffix(.hint))]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn schema(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::SchemaValidation {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(" ({hint})"),
        None => String::new(),
    }
}
