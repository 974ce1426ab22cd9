//! Sanity CMS connection settings.

use serde::Deserialize;

/// Sanity project configuration.
///
/// The write token is loaded from `SANITY_API_TOKEN` at runtime and never
/// read from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct SanityConfig {
    /// Project identifier (subdomain of `api.sanity.io`).
    #[serde(default)]
    pub project_id: String,

    /// Dataset name. Defaults to "production".
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Pinned API version (`YYYY-MM-DD`).
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Query through the CDN when no token is configured.
    #[serde(default = "default_use_cdn")]
    pub use_cdn: bool,

    /// API token loaded from `SANITY_API_TOKEN`.
    #[serde(skip)]
    pub token: Option<String>,
}

impl SanityConfig {
    /// True when `api_version` looks like `YYYY-MM-DD`.
    #[must_use]
    pub fn has_valid_api_version(&self) -> bool {
        chrono::NaiveDate::parse_from_str(&self.api_version, "%Y-%m-%d").is_ok()
    }
}

fn default_dataset() -> String {
    "production".into()
}

fn default_api_version() -> String {
    "2024-01-01".into()
}

const fn default_use_cdn() -> bool {
    true
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: default_use_cdn(),
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_version_format_is_checked() {
        let mut cfg = SanityConfig::default();
        assert!(cfg.has_valid_api_version());
        cfg.api_version = "v1".into();
        assert!(!cfg.has_valid_api_version());
    }
}
