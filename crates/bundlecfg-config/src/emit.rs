//! Emission in the shape the bundler consumes.
//!
//! Two renditions: a JSON value with paths already resolved, and a CommonJS
//! module (`module.exports = { ... }`) where paths stay relative to
//! `__dirname`, rule patterns are regex literals and plugins are constructed.

use std::fmt::Write as _;
use std::path::Path;

use serde_json::{json, Value};

use crate::bundle::PluginDescriptor;
use crate::config::BuildConfig;
use crate::error::{ConfigError, Result as ConfigResult};

const HTML_PLUGIN_BINDING: &str = "HtmlWebpackPlugin";
const HTML_PLUGIN_PACKAGE: &str = "html-webpack-plugin";
const INDENT: &str = "    ";

impl BuildConfig {
    /// The configuration as plain JSON with `entry` and `output.path`
    /// resolved against `config_dir`. Profiles are dropped.
    ///
    /// `plugins` stay in descriptor form (`{"kind": "html-template", ...}`);
    /// a bundler needs them constructed, which [`BuildConfig::to_module_source`]
    /// does.
    pub fn to_engine_value(&self, config_dir: impl AsRef<Path>) -> ConfigResult<Value> {
        let paths = self.resolve_paths(config_dir);
        let mut value = self.to_value()?;
        let object = value.as_object_mut().ok_or_else(|| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some("configuration did not serialize to an object".to_string()),
        })?;

        object.remove("profiles");
        object.insert("entry".into(), json!(paths.entry));
        object.insert(
            "output".into(),
            json!({ "path": paths.output_dir, "filename": self.output.filename }),
        );
        Ok(value)
    }

    /// Render as a `bundlecfg.toml` document.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(format!("TOML serialization failed: {}", e)),
        })
    }

    /// Render a CommonJS configuration module.
    ///
    /// # Example
    ///
    /// ```
    /// use bundlecfg_config::BuildConfig;
    ///
    /// let source = BuildConfig::default().to_module_source().unwrap();
    /// assert!(source.contains(r"test: /\.scss/"));
    /// assert!(source.contains(r#"path: path.resolve(__dirname, "../..")"#));
    /// ```
    pub fn to_module_source(&self) -> ConfigResult<String> {
        let to_js = |value: Value| Js::from(value);
        let encode = |field: &str, value: Result<Value, serde_json::Error>| {
            value.map_err(|e| ConfigError::InvalidValue {
                field: field.to_string(),
                hint: Some(e.to_string()),
            })
        };

        let plugins = self
            .plugins
            .iter()
            .map(|plugin| -> ConfigResult<Js> {
                match plugin {
                    PluginDescriptor::HtmlTemplate(options) => {
                        let options = encode("plugins", serde_json::to_value(options))?;
                        Ok(Js::Call(
                            format!("new {HTML_PLUGIN_BINDING}"),
                            Box::new(to_js(options)),
                        ))
                    }
                }
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        let rules = self
            .module
            .rules
            .iter()
            .map(|rule| -> ConfigResult<Js> {
                let use_ = encode("module.rules", serde_json::to_value(&rule.use_))?;
                Ok(Js::Object(vec![
                    ("test".into(), Js::Raw(regex_literal(rule.test.as_str()))),
                    ("use".into(), to_js(use_)),
                ]))
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        let config = Js::Object(vec![
            ("mode".into(), to_js(json!(self.mode))),
            ("entry".into(), path_resolve(&self.entry)),
            ("resolve".into(), to_js(encode("resolve", serde_json::to_value(&self.resolve))?)),
            ("plugins".into(), Js::Array(plugins)),
            (
                "output".into(),
                Js::Object(vec![
                    ("path".into(), path_resolve(&self.output.path)),
                    ("filename".into(), to_js(json!(self.output.filename))),
                ]),
            ),
            (
                "devServer".into(),
                to_js(encode("devServer", serde_json::to_value(&self.dev_server))?),
            ),
            (
                "module".into(),
                Js::Object(vec![("rules".into(), Js::Array(rules))]),
            ),
        ]);

        let mut out = String::new();
        if !self.plugins.is_empty() {
            let _ = writeln!(
                out,
                "const {HTML_PLUGIN_BINDING} = require('{HTML_PLUGIN_PACKAGE}');"
            );
        }
        out.push_str("const path = require('path');\n\nmodule.exports = ");
        config.render(&mut out, 0);
        out.push_str(";\n");
        Ok(out)
    }
}

/// Minimal JavaScript expression tree for rendering.
enum Js {
    Raw(String),
    Call(String, Box<Js>),
    Array(Vec<Js>),
    Object(Vec<(String, Js)>),
}

impl From<Value> for Js {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Js::Array(items.into_iter().map(Js::from).collect()),
            Value::Object(map) => Js::Object(map.into_iter().map(|(k, v)| (k, Js::from(v))).collect()),
            scalar => Js::Raw(scalar.to_string()),
        }
    }
}

impl Js {
    fn render(&self, out: &mut String, depth: usize) {
        match self {
            Js::Raw(text) => out.push_str(text),
            Js::Call(callee, argument) => {
                out.push_str(callee);
                out.push('(');
                argument.render(out, depth);
                out.push(')');
            }
            Js::Array(items) if items.is_empty() => out.push_str("[]"),
            Js::Array(items) => {
                out.push_str("[\n");
                for (i, item) in items.iter().enumerate() {
                    push_indent(out, depth + 1);
                    item.render(out, depth + 1);
                    out.push_str(if i + 1 < items.len() { ",\n" } else { "\n" });
                }
                push_indent(out, depth);
                out.push(']');
            }
            Js::Object(fields) if fields.is_empty() => out.push_str("{}"),
            Js::Object(fields) => {
                out.push_str("{\n");
                for (i, (key, value)) in fields.iter().enumerate() {
                    push_indent(out, depth + 1);
                    if is_identifier(key) {
                        out.push_str(key);
                    } else {
                        out.push_str(&Value::String(key.clone()).to_string());
                    }
                    out.push_str(": ");
                    value.render(out, depth + 1);
                    out.push_str(if i + 1 < fields.len() { ",\n" } else { "\n" });
                }
                push_indent(out, depth);
                out.push('}');
            }
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn regex_literal(source: &str) -> String {
    let mut literal = String::with_capacity(source.len() + 2);
    literal.push('/');
    let mut escaped = false;
    for c in source.chars() {
        if c == '/' && !escaped {
            literal.push('\\');
        }
        escaped = c == '\\' && !escaped;
        literal.push(c);
    }
    literal.push('/');
    literal
}

fn path_resolve(path: &Path) -> Js {
    let text = Value::String(path.to_string_lossy().replace('\\', "/")).to_string();
    if path.is_absolute() {
        Js::Raw(text)
    } else {
        Js::Raw(format!("path.resolve(__dirname, {text})"))
    }
}
