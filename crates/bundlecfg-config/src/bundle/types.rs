use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use regex::Regex;
use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// Regular expression tested against a resource path.
///
/// Unanchored, like the bundler's `test` field: `\.css` matches anywhere in the
/// path. Stored as source text and compiled once at construction.
#[derive(Clone)]
pub struct FilePattern {
    regex: Regex,
}

impl FilePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Compile a pattern written into the source.
    pub(crate) fn literal(pattern: &'static str) -> Self {
        Self::new(pattern).expect("built-in file pattern must be a valid regex")
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Test a resource path. Backslashes are normalized so patterns behave the
    /// same on every platform.
    pub fn is_match(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref().to_string_lossy();
        if path.contains('\\') {
            self.regex.is_match(&path.replace('\\', "/"))
        } else {
            self.regex.is_match(&path)
        }
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for FilePattern {}

impl fmt::Debug for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FilePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        FilePattern::new(&source).map_err(de::Error::custom)
    }
}

impl JsonSchema for FilePattern {
    fn schema_name() -> Cow<'static, str> {
        "FilePattern".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "format": "regex",
            "description": "Regular expression tested against the resource path"
        })
    }
}
