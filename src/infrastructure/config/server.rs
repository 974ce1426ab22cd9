//! HTTP server and form integration settings.

use std::net::SocketAddr;

use serde::Deserialize;

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address. Defaults to `127.0.0.1:3000`.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `bind` is not `host:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind.parse()
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origins: Vec::new(),
        }
    }
}

/// Form sink webhooks. Both URLs come from the environment
/// (`SHEETS_WEBHOOK_URL`, `NEWSLETTER_WEBHOOK_URL`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormsConfig {
    /// Apps Script endpoint receiving candidate applications.
    #[serde(skip)]
    pub sheets_webhook_url: Option<String>,

    /// Optional endpoint mirroring newsletter signups.
    #[serde(skip)]
    pub newsletter_webhook_url: Option<String>,
}
