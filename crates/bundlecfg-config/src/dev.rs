//! Development server configuration types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DevServerOptions {
    /// Serve the bundle with the live-reload client inlined
    #[serde(default = "default_inline")]
    pub inline: bool,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl Default for DevServerOptions {
    fn default() -> Self {
        Self {
            inline: default_inline(),
            host: default_host(),
            port: None,
        }
    }
}

impl DevServerOptions {
    /// `host:port`, when a port is configured.
    pub fn address(&self) -> Option<String> {
        self.port.map(|port| format!("{}:{}", self.host, port))
    }
}

fn default_inline() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_requires_port() {
        let mut dev = DevServerOptions::default();
        assert_eq!(dev.address(), None);
        dev.port = Some(8080);
        assert_eq!(dev.address().as_deref(), Some("0.0.0.0:8080"));
    }
}
