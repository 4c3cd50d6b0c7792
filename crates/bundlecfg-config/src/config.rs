//! The build configuration record and its mode profiles.
//!
//! `BuildConfig::default()` is the canonical descriptor: a development build of
//! `src/index.js` into `../../bundle.js`, with CSS and SCSS loader chains and an
//! HTML template plugin. For file discovery, see the `discovery` module.

use std::collections::BTreeMap;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::bundle::{
    default_entry, CssLoaderOptions, FilePattern, HtmlTemplateOptions, LoaderDescriptor,
    ModuleOptions, ModuleRule, OutputOptions, PluginDescriptor, ResolveOptions,
    SassLoaderOptions, CSS_LOADER,
};
use crate::dev::DevServerOptions;
use crate::error::{ConfigError, Result as ConfigResult};
use crate::mode::Mode;

/// Pattern of the plain stylesheet rule
pub const CSS_TEST: &str = r"\.css";
/// Pattern of the SCSS rule
pub const SCSS_TEST: &str = r"\.scss";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    #[serde(default)]
    pub mode: Mode,

    /// Entry module, relative to the configuration directory
    #[serde(default = "default_entry")]
    pub entry: PathBuf,

    #[serde(default)]
    pub resolve: ResolveOptions,

    #[serde(default = "default_plugins")]
    pub plugins: Vec<PluginDescriptor>,

    #[serde(default)]
    pub output: OutputOptions,

    #[serde(default)]
    pub dev_server: DevServerOptions,

    #[serde(default = "default_module")]
    pub module: ModuleOptions,

    /// Partial overrides keyed by mode name, applied by [`BuildConfig::materialize`]
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, Value>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::for_mode(Mode::default())
    }
}

impl BuildConfig {
    /// The canonical descriptor for `mode`.
    ///
    /// # Example
    ///
    /// ```
    /// use bundlecfg_config::{BuildConfig, Mode};
    ///
    /// let config = BuildConfig::for_mode(Mode::Production);
    /// assert!(!config.source_maps_enabled());
    /// assert_eq!(config.output.filename, "bundle.js");
    /// ```
    pub fn for_mode(mode: Mode) -> Self {
        let source_map = mode.enables_source_maps();
        Self {
            mode,
            entry: default_entry(),
            resolve: ResolveOptions::default(),
            plugins: default_plugins(),
            output: OutputOptions::default(),
            dev_server: DevServerOptions::default(),
            module: stylesheet_rules(source_map),
            profiles: BTreeMap::new(),
        }
    }

    /// Source maps are requested from loaders exactly in development mode.
    pub fn source_maps_enabled(&self) -> bool {
        self.mode.enables_source_maps()
    }

    /// Switch mode and re-derive every loader's `sourceMap` option.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self.sync_source_maps();
        self
    }

    /// Bring every loader that declares `sourceMap` in line with the mode.
    pub fn sync_source_maps(&mut self) {
        let enabled = self.source_maps_enabled();
        let mut touched = 0usize;
        for rule in &mut self.module.rules {
            for loader in rule.loaders_mut() {
                if loader.sync_source_map(enabled) {
                    touched += 1;
                }
            }
        }
        debug!(mode = %self.mode, enabled, loaders = touched, "synced loader source maps");
    }

    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use bundlecfg_config::{BuildConfig, Mode};
    /// use serde_json::json;
    ///
    /// let config = BuildConfig::from_value(json!({
    ///     "mode": "production",
    ///     "output": { "filename": "app.js" }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.mode, Mode::Production);
    /// assert_eq!(config.output.filename, "app.js");
    /// assert_eq!(config.module.rules.len(), 2);
    /// assert_eq!(config.css_rule().unwrap().use_[1].source_map(), Some(false));
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        let mut config: Self = serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })?;
        // default rules are built for development; bring them in line with the mode
        config.sync_source_maps();
        Ok(config)
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Apply the profile named after the current mode, then re-derive source
    /// maps. A profile cannot switch the mode that selected it.
    pub fn materialize(mut self) -> ConfigResult<Self> {
        let mode = self.mode;
        let profiles = std::mem::take(&mut self.profiles);

        if let Some(overrides) = profiles.get(mode.as_str()).filter(|v| !v.is_null()) {
            debug!(profile = mode.as_str(), "applying profile overrides");
            let mut base = serde_json::to_value(&self).map_err(|err| {
                ConfigError::InvalidProfileOverride {
                    message: err.to_string(),
                }
            })?;
            merge_values(&mut base, overrides);
            self = serde_json::from_value(base).map_err(|err| {
                ConfigError::InvalidProfileOverride {
                    message: format!("profile '{}': {}", mode, err),
                }
            })?;
            self.mode = mode;
        }

        self.profiles = profiles;
        self.sync_source_maps();
        Ok(self)
    }

    pub fn css_rule(&self) -> Option<&ModuleRule> {
        self.module.rule_for(CSS_TEST)
    }

    pub fn scss_rule(&self) -> Option<&ModuleRule> {
        self.module.rule_for(SCSS_TEST)
    }

    pub fn html_templates(&self) -> impl Iterator<Item = &HtmlTemplateOptions> {
        self.plugins.iter().filter_map(PluginDescriptor::as_html_template)
    }

    /// JSON Schema for configuration files.
    pub fn json_schema() -> Value {
        let schema = schemars::schema_for!(BuildConfig);
        serde_json::to_value(schema).expect("Schema serialization should never fail")
    }
}

fn default_plugins() -> Vec<PluginDescriptor> {
    vec![PluginDescriptor::HtmlTemplate(HtmlTemplateOptions::default())]
}

fn default_module() -> ModuleOptions {
    stylesheet_rules(Mode::default().enables_source_maps())
}

fn stylesheet_rules(source_map: bool) -> ModuleOptions {
    let css = ModuleRule::new(
        FilePattern::literal(CSS_TEST),
        vec![
            LoaderDescriptor::style(),
            LoaderDescriptor::css(CssLoaderOptions::new(source_map)),
        ],
    );

    let mut scss = ModuleRule::new(
        FilePattern::literal(SCSS_TEST),
        vec![
            LoaderDescriptor::style(),
            LoaderDescriptor::named(CSS_LOADER),
            LoaderDescriptor::sass(SassLoaderOptions::new(source_map)),
        ],
    );
    let import_loaders = scss.expected_import_loaders() as u32;
    scss.use_[1] = LoaderDescriptor::css(CssLoaderOptions::new(source_map).import_loaders(import_loaders));

    ModuleOptions {
        rules: vec![css, scss],
    }
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_fills_canonical_defaults() {
        let config = BuildConfig::from_value(json!({})).unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn from_value_production_without_rules_disables_source_maps() {
        let config = BuildConfig::from_value(json!({ "mode": "production" })).unwrap();
        let declared: Vec<bool> = config
            .module
            .rules
            .iter()
            .flat_map(|rule| rule.use_.iter())
            .filter_map(LoaderDescriptor::source_map)
            .collect();
        assert_eq!(declared.len(), 3);
        assert!(declared.iter().all(|enabled| !enabled));
        assert_eq!(config, BuildConfig::for_mode(Mode::Production));
    }

    #[test]
    fn to_value_uses_engine_keys() {
        let value = BuildConfig::default().to_value().unwrap();
        assert_eq!(value["devServer"]["host"], json!("0.0.0.0"));
        assert_eq!(value["module"]["rules"][1]["use"][1]["options"]["importLoaders"], json!(2));
        assert!(value.get("profiles").is_none());
    }

    #[test]
    fn with_mode_rewrites_source_maps() {
        let config = BuildConfig::default().with_mode(Mode::Production);
        let scss = config.scss_rule().unwrap();
        assert!(scss.use_.iter().all(|l| l.source_map() != Some(true)));
        assert_eq!(scss.loader(CSS_LOADER).unwrap().source_map(), Some(false));
    }

    #[test]
    fn profile_merging_works() {
        let config = BuildConfig::from_value(json!({
            "mode": "production",
            "output": { "filename": "bundle.js" },
            "profiles": {
                "production": {
                    "output": { "filename": "bundle.min.js" },
                    "devServer": { "inline": false }
                },
                "development": {
                    "output": { "filename": "never.js" }
                }
            }
        }))
        .unwrap()
        .materialize()
        .unwrap();

        assert_eq!(config.output.filename, "bundle.min.js");
        assert_eq!(config.output.path, PathBuf::from("../.."));
        assert!(!config.dev_server.inline);
        assert_eq!(config.profiles.len(), 2);
    }

    #[test]
    fn profile_cannot_switch_mode() {
        let config = BuildConfig::from_value(json!({
            "profiles": { "development": { "mode": "production" } }
        }))
        .unwrap()
        .materialize()
        .unwrap();
        assert_eq!(config.mode, Mode::Development);
        assert!(config.source_maps_enabled());
    }

    #[test]
    fn invalid_profile_is_reported() {
        let result = BuildConfig::from_value(json!({
            "profiles": { "development": { "output": { "filename": 42 } } }
        }))
        .unwrap()
        .materialize();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidProfileOverride { .. })
        ));
    }

    #[test]
    fn schema_describes_top_level_fields() {
        let schema = BuildConfig::json_schema();
        let properties = schema["properties"].as_object().unwrap();
        for key in ["mode", "entry", "resolve", "plugins", "output", "devServer", "module"] {
            assert!(properties.contains_key(key), "missing {key}");
        }
    }
}
