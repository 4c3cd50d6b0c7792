use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STYLE_LOADER: &str = "style-loader";
pub const CSS_LOADER: &str = "css-loader";
pub const SASS_LOADER: &str = "sass-loader";

const SOURCE_MAP_KEY: &str = "sourceMap";
const IMPORT_LOADERS_KEY: &str = "importLoaders";

/// One transformation step in a rule's `use` chain.
///
/// Serialized in the bundler's shorthand: a bare name when there are no
/// options, `{ loader, options }` otherwise. Both forms deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLoader", into = "RawLoader")]
pub struct LoaderDescriptor {
    pub loader: String,
    pub options: Map<String, Value>,
}

impl LoaderDescriptor {
    pub fn named(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: Map::new(),
        }
    }

    pub fn with_options(loader: impl Into<String>, options: Map<String, Value>) -> Self {
        Self {
            loader: loader.into(),
            options,
        }
    }

    /// `style-loader`: injects the compiled CSS into the document.
    pub fn style() -> Self {
        Self::named(STYLE_LOADER)
    }

    pub fn css(options: CssLoaderOptions) -> Self {
        Self::with_options(CSS_LOADER, options.into_map())
    }

    pub fn sass(options: SassLoaderOptions) -> Self {
        Self::with_options(SASS_LOADER, options.into_map())
    }

    pub fn is(&self, loader: &str) -> bool {
        self.loader == loader
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn source_map(&self) -> Option<bool> {
        self.option(SOURCE_MAP_KEY).and_then(Value::as_bool)
    }

    pub fn import_loaders(&self) -> Option<u64> {
        self.option(IMPORT_LOADERS_KEY).and_then(Value::as_u64)
    }

    /// Rewrite `sourceMap` if this loader declares it. Loaders that never
    /// asked for source maps are left alone.
    pub fn sync_source_map(&mut self, enabled: bool) -> bool {
        match self.options.get_mut(SOURCE_MAP_KEY) {
            Some(slot) => {
                *slot = Value::Bool(enabled);
                true
            }
            None => false,
        }
    }
}

impl From<&str> for LoaderDescriptor {
    fn from(loader: &str) -> Self {
        Self::named(loader)
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
enum RawLoader {
    /// Loader name without options
    Name(String),
    /// Loader name with an options object
    Full {
        loader: String,
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        options: Map<String, Value>,
    },
}

impl From<RawLoader> for LoaderDescriptor {
    fn from(raw: RawLoader) -> Self {
        match raw {
            RawLoader::Name(loader) => Self::named(loader),
            RawLoader::Full { loader, options } => Self { loader, options },
        }
    }
}

impl From<LoaderDescriptor> for RawLoader {
    fn from(descriptor: LoaderDescriptor) -> Self {
        if descriptor.options.is_empty() {
            RawLoader::Name(descriptor.loader)
        } else {
            RawLoader::Full {
                loader: descriptor.loader,
                options: descriptor.options,
            }
        }
    }
}

impl JsonSchema for LoaderDescriptor {
    fn schema_name() -> Cow<'static, str> {
        "LoaderDescriptor".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        RawLoader::json_schema(generator)
    }
}

/// Options understood by `css-loader`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssLoaderOptions {
    pub source_map: bool,
    /// Rewrite `url()` references into module requests
    pub url: bool,
    /// Loaders applied to `@import`ed resources
    pub import_loaders: Option<u32>,
}

impl CssLoaderOptions {
    pub fn new(source_map: bool) -> Self {
        Self {
            source_map,
            url: false,
            import_loaders: None,
        }
    }

    pub fn import_loaders(mut self, count: u32) -> Self {
        self.import_loaders = Some(count);
        self
    }

    fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(SOURCE_MAP_KEY.into(), Value::Bool(self.source_map));
        map.insert("url".into(), Value::Bool(self.url));
        if let Some(count) = self.import_loaders {
            map.insert(IMPORT_LOADERS_KEY.into(), Value::from(count));
        }
        map
    }
}

/// Options understood by `sass-loader`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SassLoaderOptions {
    pub source_map: bool,
}

impl SassLoaderOptions {
    pub fn new(source_map: bool) -> Self {
        Self { source_map }
    }

    fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(SOURCE_MAP_KEY.into(), Value::Bool(self.source_map));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_name_round_trips_as_string() {
        let value = serde_json::to_value(LoaderDescriptor::style()).unwrap();
        assert_eq!(value, json!("style-loader"));

        let parsed: LoaderDescriptor = serde_json::from_value(value).unwrap();
        assert!(parsed.is(STYLE_LOADER));
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn css_loader_serializes_options() {
        let loader = LoaderDescriptor::css(CssLoaderOptions::new(true).import_loaders(2));
        assert_eq!(
            serde_json::to_value(&loader).unwrap(),
            json!({
                "loader": "css-loader",
                "options": { "sourceMap": true, "url": false, "importLoaders": 2 }
            })
        );
        assert_eq!(loader.import_loaders(), Some(2));
    }

    #[test]
    fn object_without_options_is_accepted() {
        let parsed: LoaderDescriptor =
            serde_json::from_value(json!({ "loader": "sass-loader" })).unwrap();
        assert!(parsed.is(SASS_LOADER));
        assert_eq!(parsed.source_map(), None);
    }

    #[test]
    fn sync_source_map_only_touches_declared_option() {
        let mut sass = LoaderDescriptor::sass(SassLoaderOptions::new(true));
        assert!(sass.sync_source_map(false));
        assert_eq!(sass.source_map(), Some(false));

        let mut style = LoaderDescriptor::style();
        assert!(!style.sync_source_map(true));
        assert!(style.options.is_empty());
    }
}
