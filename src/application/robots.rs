//! robots.txt generation.

use super::sitemap::STATIC_ROUTES;
use crate::infrastructure::config::site::{RobotsConfig, SiteConfig};

/// Path of the sitemap advertised to crawlers.
pub const SITEMAP_PATH: &str = "/sitemap.xml";

/// Render robots.txt: allow everything except the configured prefixes, and
/// point crawlers at the sitemap.
#[must_use]
pub fn render(site: &SiteConfig, robots: &RobotsConfig) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\n");
    for path in &robots.disallow {
        let path = path.trim();
        if path.is_empty() {
            continue;
        }
        out.push_str("Disallow: ");
        out.push_str(path);
        out.push('\n');
    }
    out.push('\n');
    out.push_str("Sitemap: ");
    out.push_str(&site.url(SITEMAP_PATH));
    out.push('\n');
    out
}

/// Static routes hidden by a disallow rule.
#[must_use]
pub fn blocked_static_routes(robots: &RobotsConfig) -> Vec<&'static str> {
    STATIC_ROUTES
        .iter()
        .map(|r| r.path)
        .filter(|path| {
            robots
                .disallow
                .iter()
                .any(|d| !d.trim().is_empty() && path.starts_with(d.trim()))
        })
        .collect()
}
