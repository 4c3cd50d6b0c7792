use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::bundle::loader::LoaderDescriptor;
use crate::bundle::types::FilePattern;

/// Maps resources matching `test` to a loader pipeline.
///
/// `use` is written outermost-first: the bundler runs the last loader first
/// and hands its output to the one before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ModuleRule {
    pub test: FilePattern,

    #[serde(rename = "use")]
    pub use_: Vec<LoaderDescriptor>,
}

impl ModuleRule {
    pub fn new(test: FilePattern, use_: Vec<LoaderDescriptor>) -> Self {
        Self { test, use_ }
    }

    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        self.test.is_match(path)
    }

    /// Loaders in the order they actually run.
    pub fn execution_order(&self) -> impl DoubleEndedIterator<Item = &LoaderDescriptor> {
        self.use_.iter().rev()
    }

    /// Number of loaders chained alongside the first one; what `importLoaders`
    /// on `css-loader` is set to in the default SCSS rule.
    pub fn expected_import_loaders(&self) -> usize {
        self.use_.len().saturating_sub(1)
    }

    pub fn loader(&self, name: &str) -> Option<&LoaderDescriptor> {
        self.use_.iter().find(|loader| loader.is(name))
    }

    pub fn loaders_mut(&mut self) -> impl Iterator<Item = &mut LoaderDescriptor> {
        self.use_.iter_mut()
    }
}

/// The `module` section of a build configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ModuleOptions {
    /// Evaluated in declaration order
    #[serde(default)]
    pub rules: Vec<ModuleRule>,
}

impl ModuleOptions {
    /// Every rule whose pattern matches `path`, in declaration order.
    pub fn matching(&self, path: impl AsRef<Path>) -> Vec<&ModuleRule> {
        let path = path.as_ref();
        self.rules.iter().filter(|rule| rule.matches(path)).collect()
    }

    /// Combined pipeline for `path` in execution order.
    ///
    /// Matching rules contribute their chains in declaration order, so the
    /// combined chain runs from the last loader of the last matching rule
    /// back to the first loader of the first one.
    pub fn pipeline_for(&self, path: impl AsRef<Path>) -> Vec<&LoaderDescriptor> {
        let path = path.as_ref();
        let mut chain: Vec<&LoaderDescriptor> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(path))
            .flat_map(|rule| rule.use_.iter())
            .collect();
        chain.reverse();
        chain
    }

    pub fn rule_for(&self, pattern: &str) -> Option<&ModuleRule> {
        self.rules.iter().find(|rule| rule.test.as_str() == pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::loader::{CssLoaderOptions, SassLoaderOptions, CSS_LOADER, SASS_LOADER, STYLE_LOADER};

    fn scss_rule() -> ModuleRule {
        ModuleRule::new(
            FilePattern::new(r"\.scss").unwrap(),
            vec![
                LoaderDescriptor::style(),
                LoaderDescriptor::css(CssLoaderOptions::new(true).import_loaders(2)),
                LoaderDescriptor::sass(SassLoaderOptions::new(true)),
            ],
        )
    }

    #[test]
    fn execution_order_is_reversed() {
        let rule = scss_rule();
        let names: Vec<&str> = rule.execution_order().map(|l| l.loader.as_str()).collect();
        assert_eq!(names, vec![SASS_LOADER, CSS_LOADER, STYLE_LOADER]);
    }

    #[test]
    fn expected_import_loaders_counts_chain() {
        assert_eq!(scss_rule().expected_import_loaders(), 2);
        let empty = ModuleRule::new(FilePattern::new("x").unwrap(), vec![]);
        assert_eq!(empty.expected_import_loaders(), 0);
    }

    #[test]
    fn pipeline_combines_matching_rules() {
        let module = ModuleOptions {
            rules: vec![
                ModuleRule::new(
                    FilePattern::new(r"\.scss").unwrap(),
                    vec![LoaderDescriptor::named("a"), LoaderDescriptor::named("b")],
                ),
                ModuleRule::new(
                    FilePattern::new(r"theme").unwrap(),
                    vec![LoaderDescriptor::named("c")],
                ),
            ],
        };

        let names: Vec<&str> = module
            .pipeline_for("src/theme.scss")
            .into_iter()
            .map(|l| l.loader.as_str())
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
        assert!(module.pipeline_for("src/index.js").is_empty());
    }

    #[test]
    fn use_key_is_renamed() {
        let value = serde_json::to_value(scss_rule()).unwrap();
        assert_eq!(value["test"], serde_json::json!(r"\.scss"));
        assert_eq!(value["use"].as_array().map(Vec::len), Some(3));
    }
}
