//! RSS 2.0 feed (`/feed.xml`).

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::markup::escape_xml;
use crate::domain::{DocumentType, Post};
use crate::error::Result;
use crate::infrastructure::config::site::{FeedConfig, SiteConfig};
use crate::port::outbound::cms::ContentSource;

/// Path the feed is served from; used for the `atom:link rel="self"`.
pub const FEED_PATH: &str = "/feed.xml";

/// Posts eligible for the feed at `now`: published, with a slug, newest
/// first, at most `max_items`.
#[must_use]
pub fn select_items(posts: &[Post], now: DateTime<Utc>, max_items: usize) -> Vec<&Post> {
    let mut items: Vec<&Post> = posts
        .iter()
        .filter(|p| p.slug.is_some() && p.is_published_at(now))
        .collect();
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    items.truncate(max_items);
    items
}

fn item_description(post: &Post) -> Option<&str> {
    post.excerpt
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .or_else(|| post.meta_description.as_deref().filter(|d| !d.trim().is_empty()))
}

/// Render the feed document.
#[must_use]
pub fn render(site: &SiteConfig, feed: &FeedConfig, posts: &[Post], now: DateTime<Utc>) -> String {
    let items = select_items(posts, now, feed.max_items);
    let mut xml = String::with_capacity(512 + items.len() * 512);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n",
    );
    xml.push_str("  <channel>\n");
    let _ = writeln!(xml, "    <title>{}</title>", escape_xml(&site.name));
    let _ = writeln!(xml, "    <link>{}</link>", escape_xml(&site.url("/")));
    let _ = writeln!(xml, "    <description>{}</description>", escape_xml(&site.description));
    let _ = writeln!(xml, "    <language>{}</language>", escape_xml(&site.language));
    let _ = writeln!(xml, "    <lastBuildDate>{}</lastBuildDate>", now.to_rfc2822());
    let _ = writeln!(
        xml,
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>",
        escape_xml(&site.url(FEED_PATH))
    );

    for post in items {
        let Some(slug) = &post.slug else { continue };
        let link = site.url(&format!("{}/{}", DocumentType::Post.route_prefix(), slug));

        xml.push_str("    <item>\n");
        let _ = writeln!(xml, "      <title>{}</title>", escape_xml(&post.title));
        let _ = writeln!(xml, "      <link>{}</link>", escape_xml(&link));
        let _ = writeln!(xml, "      <guid isPermaLink=\"true\">{}</guid>", escape_xml(&link));
        if let Some(published) = post.published_at {
            let _ = writeln!(xml, "      <pubDate>{}</pubDate>", published.to_rfc2822());
        }
        if let Some(description) = item_description(post) {
            let _ = writeln!(xml, "      <description>{}</description>", escape_xml(description));
        }
        if let Some(author) = post.author.as_deref().filter(|a| !a.trim().is_empty()) {
            let _ = writeln!(xml, "      <dc:creator>{}</dc:creator>", escape_xml(author));
        }
        for category in &post.categories {
            let _ = writeln!(xml, "      <category>{}</category>", escape_xml(&category.title));
        }
        xml.push_str("    </item>\n");
    }

    xml.push_str("  </channel>\n</rss>\n");
    xml
}

/// Load posts and render the feed.
///
/// # Errors
/// Returns an error if the CMS cannot be read.
pub async fn generate(
    source: &dyn ContentSource,
    site: &SiteConfig,
    feed: &FeedConfig,
    now: DateTime<Utc>,
) -> Result<String> {
    let posts = source.posts().await?;
    Ok(render(site, feed, &posts, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryRef, DocumentId, Slug};
    use chrono::{Duration, TimeZone};

    fn post(slug: &str, days_ago: i64, now: DateTime<Utc>) -> Post {
        Post {
            id: DocumentId::new(slug),
            title: format!("Post {slug}"),
            slug: Some(Slug::parse(slug).unwrap()),
            excerpt: Some("An excerpt".into()),
            meta_title: None,
            meta_description: None,
            published_at: Some(now - Duration::days(days_ago)),
            updated_at: None,
            main_image: None,
            author: Some("Casey & Co".into()),
            categories: vec![CategoryRef {
                title: "Bass".into(),
                slug: None,
            }],
            body_text: String::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn select_items_orders_and_limits() {
        let now = now();
        let posts = vec![post("old", 10, now), post("new", 1, now), post("mid", 5, now)];
        let items = select_items(&posts, now, 2);
        let slugs: Vec<&str> = items.iter().map(|p| p.slug.as_ref().unwrap().as_str()).collect();
        assert_eq!(slugs, ["new", "mid"]);
    }

    #[test]
    fn future_posts_are_excluded() {
        let now = now();
        let posts = vec![post("scheduled", -3, now), post("live", 1, now)];
        let items = select_items(&posts, now, 20);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].slug.as_ref().unwrap().as_str(), "live");
    }

    #[test]
    fn render_contains_channel_and_escaped_items() {
        let now = now();
        let xml = render(
            &SiteConfig::default(),
            &FeedConfig::default(),
            &[post("pike-jigs", 2, now)],
            now,
        );
        assert!(xml.contains("<atom:link href=\"https://www.fishandtips.com/feed.xml\" rel=\"self\""));
        assert!(xml.contains("<guid isPermaLink=\"true\">https://www.fishandtips.com/blog/pike-jigs</guid>"));
        assert!(xml.contains("<dc:creator>Casey &amp; Co</dc:creator>"));
        assert!(xml.contains("<category>Bass</category>"));
        assert!(xml.contains("<lastBuildDate>Sat, 1 Jun 2024 12:00:00 +0000</lastBuildDate>"));
    }
}
