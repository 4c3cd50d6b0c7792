//! Bundle-level configuration types: output, module lookup, rules, plugins.

mod helpers;
mod html;
mod loader;
mod plugin;
mod rule;
mod types;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use html::HtmlTemplateOptions;
pub use loader::{
    CssLoaderOptions, LoaderDescriptor, SassLoaderOptions, CSS_LOADER, SASS_LOADER, STYLE_LOADER,
};
pub use plugin::PluginDescriptor;
pub use rule::{ModuleOptions, ModuleRule};
pub use types::FilePattern;

pub(crate) use helpers::{default_entry, default_extensions, default_output_filename, default_output_path};

/// Where the bundled artifact is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OutputOptions {
    /// Output directory, relative to the configuration directory
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Filename of the emitted bundle
    #[serde(default = "default_output_filename")]
    pub filename: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            filename: default_output_filename(),
        }
    }
}

/// Module lookup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolveOptions {
    /// Extensions tried, in order, when a request has none that matches
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

impl ResolveOptions {
    /// Paths tried for an import request, in lookup order.
    ///
    /// The request as written comes first, then the request with each
    /// configured extension appended.
    ///
    /// # Example
    ///
    /// ```
    /// use bundlecfg_config::ResolveOptions;
    /// use std::path::PathBuf;
    ///
    /// let resolve = ResolveOptions::default();
    /// let candidates = resolve.candidates("./pkg/app");
    /// assert_eq!(candidates[0], PathBuf::from("./pkg/app"));
    /// assert_eq!(candidates[2], PathBuf::from("./pkg/app.wasm"));
    /// ```
    pub fn candidates(&self, request: impl AsRef<Path>) -> Vec<PathBuf> {
        let request = request.as_ref();
        let mut candidates = Vec::with_capacity(self.extensions.len() + 1);
        candidates.push(request.to_path_buf());
        for ext in &self.extensions {
            let mut with_ext = request.as_os_str().to_os_string();
            with_ext.push(ext);
            candidates.push(PathBuf::from(with_ext));
        }
        candidates
    }
}
