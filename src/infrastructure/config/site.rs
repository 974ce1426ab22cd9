//! Public site settings: identity, feed and robots policy.

use serde::Deserialize;

/// Site identity used in generated documents and metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute origin, e.g. `https://www.fishandtips.com` (no trailing slash
    /// required).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_description")]
    pub description: String,
    /// Content language (`en-us`).
    #[serde(default = "default_language")]
    pub language: String,
    /// Social handle shown in Twitter cards, without `@`.
    #[serde(default)]
    pub twitter_handle: Option<String>,
    /// Default share image when a page has none.
    #[serde(default)]
    pub default_image: Option<String>,
}

impl SiteConfig {
    /// Base URL without a trailing slash.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute URL for a site path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() || path == "/" {
            return format!("{}/", self.origin());
        }
        if path.starts_with('/') {
            format!("{}{}", self.origin(), path)
        } else {
            format!("{}/{}", self.origin(), path)
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            name: default_name(),
            description: default_description(),
            language: default_language(),
            twitter_handle: None,
            default_image: None,
        }
    }
}

fn default_base_url() -> String {
    "https://www.fishandtips.com".into()
}

fn default_name() -> String {
    "FishandTips".into()
}

fn default_description() -> String {
    "Fishing tips, techniques and gear guides for anglers of every level.".into()
}

fn default_language() -> String {
    "en-us".into()
}

/// RSS feed settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Number of posts included in the feed. Defaults to 20.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

const fn default_max_items() -> usize {
    20
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}

/// robots.txt policy.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotsConfig {
    /// Path prefixes crawlers must not visit.
    #[serde(default = "default_disallow")]
    pub disallow: Vec<String>,
}

fn default_disallow() -> Vec<String> {
    vec!["/api/".into(), "/studio/".into()]
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            disallow: default_disallow(),
        }
    }
}
