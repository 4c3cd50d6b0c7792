//! Tests for file discovery and layered loading.

use bundlecfg_config::{ConfigDiscovery, ConfigError, Mode, CSS_LOADER};
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write config");
    path
}

#[test]
#[serial]
fn empty_toml_yields_canonical_config() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bundlecfg.toml", "");

    let loaded = ConfigDiscovery::new(dir.path()).without_env().load().unwrap();
    assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
    assert_eq!(loaded.config.mode, Mode::Development);
    assert_eq!(loaded.config.output.filename, "bundle.js");
    assert_eq!(loaded.config.module.rules.len(), 2);
}

#[test]
#[serial]
fn toml_overrides_merge_with_defaults() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "bundlecfg.toml",
        r#"
entry = "src/main.js"

[output]
filename = "app.js"

[devServer]
port = 9000
"#,
    );

    let config = ConfigDiscovery::new(dir.path())
        .without_env()
        .load()
        .unwrap()
        .config;
    assert_eq!(config.entry, PathBuf::from("src/main.js"));
    assert_eq!(config.output.filename, "app.js");
    assert_eq!(config.output.path, PathBuf::from("../.."));
    assert_eq!(config.dev_server.port, Some(9000));
    assert_eq!(config.dev_server.host, "0.0.0.0");
}

#[test]
#[serial]
fn rules_from_file_replace_defaults() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "bundlecfg.toml",
        r#"
[[module.rules]]
test = '\.less'
use = ["style-loader", { loader = "css-loader", options = { sourceMap = false } }, "less-loader"]
"#,
    );

    let config = ConfigDiscovery::new(dir.path())
        .without_env()
        .load()
        .unwrap()
        .config;
    assert_eq!(config.module.rules.len(), 1);
    let rule = &config.module.rules[0];
    assert!(rule.matches("theme.less"));
    // development mode re-derives the declared sourceMap option
    assert_eq!(rule.loader(CSS_LOADER).unwrap().source_map(), Some(true));
    assert_eq!(rule.use_[2].loader, "less-loader");
}

#[test]
#[serial]
fn invalid_pattern_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "bundlecfg.toml",
        r#"
[[module.rules]]
test = '(\.css'
use = ["style-loader"]
"#,
    );

    let result = ConfigDiscovery::new(dir.path()).without_env().load();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
#[serial]
fn json_config_is_loaded() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "bundlecfg.json",
        r#"{ "mode": "production", "resolve": { "extensions": [".js"] } }"#,
    );

    let config = ConfigDiscovery::new(dir.path())
        .without_env()
        .load()
        .unwrap()
        .config;
    assert_eq!(config.mode, Mode::Production);
    assert!(!config.source_maps_enabled());
    assert_eq!(config.resolve.extensions, vec![".js"]);
}

#[test]
#[serial]
fn package_json_field_is_loaded() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "package.json",
        r#"{ "name": "app", "bundlecfg": { "output": { "filename": "pkg.js" } } }"#,
    );

    let loaded = ConfigDiscovery::new(dir.path()).without_env().load().unwrap();
    assert_eq!(loaded.config.output.filename, "pkg.js");
    assert!(loaded.source.unwrap().ends_with("package.json"));
}

#[test]
#[serial]
fn profile_for_mode_is_applied() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "bundlecfg.toml",
        r#"
[profiles.production.output]
filename = "bundle.min.js"

[profiles.production.devServer]
inline = false
"#,
    );

    let dev = ConfigDiscovery::new(dir.path())
        .without_env()
        .load()
        .unwrap()
        .config;
    assert_eq!(dev.output.filename, "bundle.js");

    let prod = ConfigDiscovery::new(dir.path())
        .without_env()
        .with_mode(Mode::Production)
        .load()
        .unwrap()
        .config;
    assert_eq!(prod.mode, Mode::Production);
    assert_eq!(prod.output.filename, "bundle.min.js");
    assert!(!prod.dev_server.inline);
    assert!(!prod.source_maps_enabled());
}

#[test]
#[serial]
fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bundlecfg.toml", "mode = \"development\"\n");

    unsafe {
        std::env::set_var("BUNDLECFG_MODE", "production");
        std::env::set_var("BUNDLECFG_OUTPUT__FILENAME", "env.js");
    }
    let result = ConfigDiscovery::new(dir.path()).load();
    unsafe {
        std::env::remove_var("BUNDLECFG_MODE");
        std::env::remove_var("BUNDLECFG_OUTPUT__FILENAME");
    }

    let config = result.unwrap().config;
    assert_eq!(config.mode, Mode::Production);
    assert_eq!(config.output.filename, "env.js");
}

#[test]
#[serial]
fn environment_reaches_camel_case_sections() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bundlecfg.toml", "[devServer]\nport = 8080\n");

    unsafe {
        std::env::set_var("BUNDLECFG_DEVSERVER__HOST", "127.0.0.1");
    }
    let result = ConfigDiscovery::new(dir.path()).load();
    unsafe {
        std::env::remove_var("BUNDLECFG_DEVSERVER__HOST");
    }

    let config = result.unwrap().config;
    assert_eq!(config.dev_server.host, "127.0.0.1");
    assert_eq!(config.dev_server.port, Some(8080));
    assert!(config.dev_server.inline);
}

#[test]
#[serial]
fn caller_mode_beats_environment() {
    let dir = TempDir::new().unwrap();

    unsafe {
        std::env::set_var("BUNDLECFG_MODE", "production");
    }
    let result = ConfigDiscovery::new(dir.path())
        .with_mode(Mode::Development)
        .load_or_default();
    unsafe {
        std::env::remove_var("BUNDLECFG_MODE");
    }

    let loaded = result.unwrap();
    assert!(loaded.source.is_none());
    assert_eq!(loaded.config.mode, Mode::Development);
}

#[test]
#[serial]
fn config_dir_anchors_relative_paths() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("www").join("node");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("bundlecfg.toml"), "").unwrap();

    let loaded = ConfigDiscovery::new(&nested).without_env().load().unwrap();
    let paths = loaded.resolve_paths();
    let root = dir.path().canonicalize().unwrap();
    assert_eq!(paths.output_dir.canonicalize().unwrap(), root);
    assert_eq!(paths.output_file.file_name().unwrap(), "bundle.js");
}
