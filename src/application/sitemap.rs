//! Sitemap generation (`/sitemap.xml`).
//!
//! Entries are built from a [`SiteContent`] snapshot, then rendered as
//! sitemap-protocol XML. Documents without a slug have no route and are
//! skipped; a URL appears at most once.

use std::collections::HashSet;
use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::markup::escape_xml;
use crate::domain::{Category, DocumentType, Post, Slug, Technique};
use crate::error::Result;
use crate::infrastructure::config::site::SiteConfig;
use crate::port::outbound::cms::ContentSource;

const XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// A fixed route of the site.
#[derive(Debug, Clone, Copy)]
pub struct StaticRoute {
    pub path: &'static str,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Home plus the site's static pages.
pub const STATIC_ROUTES: &[StaticRoute] = &[
    StaticRoute { path: "/", changefreq: ChangeFreq::Daily, priority: 1.0 },
    StaticRoute { path: "/blog", changefreq: ChangeFreq::Weekly, priority: 0.9 },
    StaticRoute { path: "/about", changefreq: ChangeFreq::Monthly, priority: 0.5 },
    StaticRoute { path: "/contact", changefreq: ChangeFreq::Monthly, priority: 0.5 },
    StaticRoute { path: "/newsletter", changefreq: ChangeFreq::Monthly, priority: 0.5 },
    StaticRoute { path: "/privacy-policy", changefreq: ChangeFreq::Monthly, priority: 0.5 },
    StaticRoute { path: "/terms-of-service", changefreq: ChangeFreq::Monthly, priority: 0.5 },
    StaticRoute { path: "/cookie-policy", changefreq: ChangeFreq::Monthly, priority: 0.5 },
];

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Published content needed for site-wide documents.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub techniques: Vec<Technique>,
}

impl SiteContent {
    /// Fetch all posts, categories and techniques.
    ///
    /// # Errors
    /// Returns the first CMS error.
    pub async fn load(source: &dyn ContentSource) -> Result<Self> {
        Ok(Self {
            posts: source.posts().await?,
            categories: source.categories().await?,
            techniques: source.techniques().await?,
        })
    }
}

fn route(doc_type: DocumentType, slug: &Slug) -> String {
    format!("{}/{}", doc_type.route_prefix(), slug)
}

fn date(at: Option<DateTime<Utc>>) -> Option<NaiveDate> {
    at.map(|t| t.date_naive())
}

/// Build sitemap entries in output order: static routes, posts, categories,
/// techniques.
#[must_use]
pub fn entries(site: &SiteConfig, content: &SiteContent, today: NaiveDate) -> Vec<SitemapEntry> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut skipped = 0usize;

    let mut push = |loc: String, lastmod, changefreq, priority| {
        if seen.insert(loc.clone()) {
            out.push(SitemapEntry {
                loc,
                lastmod,
                changefreq,
                priority,
            });
        }
    };

    for r in STATIC_ROUTES {
        push(site.url(r.path), Some(today), r.changefreq, r.priority);
    }

    for post in &content.posts {
        match &post.slug {
            Some(slug) => push(
                site.url(&route(DocumentType::Post, slug)),
                date(post.last_modified()),
                ChangeFreq::Weekly,
                0.8,
            ),
            None => skipped += 1,
        }
    }

    for category in &content.categories {
        match &category.slug {
            Some(slug) => push(
                site.url(&route(DocumentType::Category, slug)),
                date(category.updated_at),
                ChangeFreq::Weekly,
                0.7,
            ),
            None => skipped += 1,
        }
    }

    for technique in &content.techniques {
        match &technique.slug {
            Some(slug) => push(
                site.url(&route(DocumentType::Technique, slug)),
                date(technique.updated_at),
                ChangeFreq::Monthly,
                0.7,
            ),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, "Documents without a slug left out of the sitemap");
    }
    debug!(urls = out.len(), "Sitemap entries built");
    out
}

/// Render entries as sitemap XML.
#[must_use]
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 160);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(xml, "<urlset xmlns=\"{XMLNS}\">");
    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc));
        if let Some(lastmod) = entry.lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"));
        }
        let _ = writeln!(xml, "    <changefreq>{}</changefreq>", entry.changefreq.as_str());
        let _ = writeln!(xml, "    <priority>{:.1}</priority>", entry.priority);
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Load content and render the sitemap.
///
/// # Errors
/// Returns an error if the CMS cannot be read.
pub async fn generate(source: &dyn ContentSource, site: &SiteConfig, today: NaiveDate) -> Result<String> {
    let content = SiteContent::load(source).await?;
    Ok(render(&entries(site, &content, today)))
}
