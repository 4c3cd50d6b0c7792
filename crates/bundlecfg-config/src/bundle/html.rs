use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::bundle::helpers::{default_html_filename, default_template, default_true};

/// HTML document generation from a template file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HtmlTemplateOptions {
    /// Template the document is generated from
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Output filename for the generated document (default: "index.html")
    #[serde(default = "default_html_filename")]
    pub filename: String,

    /// Inject a script tag for the bundled output
    #[serde(default = "default_true")]
    pub inject: bool,
}

impl HtmlTemplateOptions {
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }
}

impl Default for HtmlTemplateOptions {
    fn default() -> Self {
        Self {
            template: default_template(),
            filename: default_html_filename(),
            inject: true,
        }
    }
}
