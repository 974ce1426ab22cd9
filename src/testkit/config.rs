//! Canonical test configuration.
//!
//! Single source of truth for config structs used across tests, so no test
//! depends on the environment of the machine running it.

use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::site::SiteConfig;

/// Minimal valid TOML for [`Config::parse_toml`].
pub const MINIMAL_TOML: &str = r#"
[site]
base_url = "https://www.fishandtips.com"

[sanity]
project_id = "test1234"
dataset = "production"
"#;

/// Site settings pointing at the production origin.
pub fn site() -> SiteConfig {
    SiteConfig::default()
}

/// A complete configuration with every integration disabled.
pub fn config() -> Config {
    let mut config = Config::default();
    config.sanity.project_id = "test1234".into();
    config.site = site();
    config
}
