//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for credentials such as `SANITY_API_TOKEN`.
//!
//! # Example
//!
//! ```no_run
//! use fishandtips::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use super::sanity::SanityConfig;
use super::server::{FormsConfig, ServerConfig};
use super::site::{FeedConfig, RobotsConfig, SiteConfig};
use super::social::SocialConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Aggregates all configuration settings for the application. Load from a TOML
/// file using [`Config::load`] or parse directly with [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Public site identity.
    #[serde(default)]
    pub site: SiteConfig,

    /// CMS connection.
    #[serde(default)]
    pub sanity: SanityConfig,

    /// HTTP server.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// LLM provider configuration.
    #[serde(default)]
    pub llm: LlmConfig,

    /// RSS feed settings.
    #[serde(default)]
    pub feed: FeedConfig,

    /// robots.txt policy.
    #[serde(default)]
    pub robots: RobotsConfig,

    /// Form webhooks (populated from the environment).
    #[serde(default)]
    pub forms: FormsConfig,

    /// Social carousel pipeline.
    #[serde(default)]
    pub social: SocialConfig,

    /// Path to SQLite database file.
    ///
    /// Defaults to "fishandtips.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,
}

fn default_database_path() -> String {
    "fishandtips.db".to_string()
}

/// Read a credential from the environment, treating blank values as unset.
fn env_secret(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Credentials are loaded from environment variables, never from the
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., a relative `base_url`)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.load_secrets();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn load_secrets(&mut self) {
        self.sanity.token = env_secret("SANITY_API_TOKEN");
        self.forms.sheets_webhook_url = env_secret("SHEETS_WEBHOOK_URL");
        self.forms.newsletter_webhook_url = env_secret("NEWSLETTER_WEBHOOK_URL");
        self.social.unsplash.access_key = env_secret("UNSPLASH_ACCESS_KEY");
        self.social.cloudinary.api_key = env_secret("CLOUDINARY_API_KEY");
        self.social.cloudinary.api_secret = env_secret("CLOUDINARY_API_SECRET");
        self.social.instagram.access_token = env_secret("INSTAGRAM_ACCESS_TOKEN");
        self.social.pinterest.access_token = env_secret("PINTEREST_ACCESS_TOKEN");
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.site.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url",
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: "must be an http or https URL".to_string(),
            }
            .into());
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "site.name" }.into());
        }

        if self.sanity.project_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "sanity.project_id",
            }
            .into());
        }
        if self.sanity.dataset.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "sanity.dataset",
            }
            .into());
        }
        if !self.sanity.has_valid_api_version() {
            return Err(ConfigError::InvalidValue {
                field: "api_version",
                reason: "must be a date formatted YYYY-MM-DD".to_string(),
            }
            .into());
        }

        if self.feed.max_items == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_items",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if let Err(e) = self.server.socket_addr() {
            return Err(ConfigError::InvalidValue {
                field: "bind",
                reason: e.to_string(),
            }
            .into());
        }

        if self.social.render_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "render_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
