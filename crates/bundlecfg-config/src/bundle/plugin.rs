use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::bundle::html::HtmlTemplateOptions;

/// Plugin handed to the bundler, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PluginDescriptor {
    /// Generates an HTML document from a template and injects the bundle
    HtmlTemplate(HtmlTemplateOptions),
}

impl PluginDescriptor {
    pub fn html_template(template: impl Into<std::path::PathBuf>) -> Self {
        PluginDescriptor::HtmlTemplate(HtmlTemplateOptions::new(template))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PluginDescriptor::HtmlTemplate(_) => "html-template",
        }
    }

    pub fn as_html_template(&self) -> Option<&HtmlTemplateOptions> {
        match self {
            PluginDescriptor::HtmlTemplate(options) => Some(options),
        }
    }
}
