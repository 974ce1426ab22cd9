//! SEO page metadata: title, description, canonical URL, Open Graph,
//! Twitter card and JSON-LD structured data.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::seo::{truncate_words, DESCRIPTION_MAX};
use crate::domain::{Category, DocumentType, Post, Slug, Technique};
use crate::error::Result;
use crate::infrastructure::config::site::SiteConfig;
use crate::port::outbound::cms::ContentSource;

/// Google truncates `headline` beyond this.
const HEADLINE_MAX: usize = 110;

/// Open Graph tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub og_type: &'static str,
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// Twitter card tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// Everything a page head needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    #[serde(rename = "jsonLd")]
    pub json_ld: Value,
}

/// `"{title} | {site}"`, unless the title already names the site.
#[must_use]
pub fn page_title(title: &str, site_name: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        return site_name.to_string();
    }
    if title.to_lowercase().contains(&site_name.to_lowercase()) {
        title.to_string()
    } else {
        format!("{title} | {site_name}")
    }
}

/// Leading sentences of `body` that fit in `max` characters, or a
/// word-truncated prefix when even the first sentence is too long.
#[must_use]
pub fn leading_sentences(body: &str, max: usize) -> String {
    let text = body.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::new();
    let mut rest = text.as_str();

    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .find(|&(i, c)| {
                matches!(c, '.' | '!' | '?') && rest[i + c.len_utf8()..].starts_with(' ')
            })
            .map_or(rest.len(), |(i, c)| i + c.len_utf8());
        let sentence = &rest[..end];
        let candidate_len = out.chars().count() + usize::from(!out.is_empty()) + sentence.chars().count();
        if candidate_len > max {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(sentence);
        rest = rest[end..].trim_start();
    }

    if out.is_empty() {
        truncate_words(&text, max)
    } else {
        out
    }
}

fn twitter_site(site: &SiteConfig) -> Option<String> {
    site.twitter_handle
        .as_deref()
        .map(|h| h.trim().trim_start_matches('@'))
        .filter(|h| !h.is_empty())
        .map(|h| format!("@{h}"))
}

fn publisher(site: &SiteConfig) -> Value {
    json!({
        "@type": "Organization",
        "name": site.name,
        "url": site.url("/"),
    })
}

impl PageMetadata {
    /// Metadata for an article page.
    #[must_use]
    pub fn for_post(post: &Post, site: &SiteConfig) -> Self {
        let title = page_title(post.seo_title(), &site.name);
        let description = match post.seo_description() {
            Some(d) => truncate_words(d, DESCRIPTION_MAX),
            None if !post.body_text.trim().is_empty() => {
                leading_sentences(&post.body_text, DESCRIPTION_MAX)
            }
            None => truncate_words(&site.description, DESCRIPTION_MAX),
        };
        let path = match &post.slug {
            Some(slug) => format!("{}/{}", DocumentType::Post.route_prefix(), slug),
            None => DocumentType::Post.route_prefix().to_string(),
        };
        let canonical = site.url(&path);
        let image = post
            .main_image
            .as_ref()
            .map(|i| i.url.clone())
            .or_else(|| site.default_image.clone());
        let published = post.published_at.map(|t| t.to_rfc3339());
        let modified = post.last_modified().map(|t| t.to_rfc3339());
        let section = post.primary_category().map(str::to_string);

        let mut json_ld = json!({
            "@context": "https://schema.org",
            "@type": "Article",
            "headline": truncate_words(&post.title, HEADLINE_MAX),
            "description": description,
            "mainEntityOfPage": canonical,
            "publisher": publisher(site),
        });
        if let Some(published) = &published {
            json_ld["datePublished"] = json!(published);
        }
        if let Some(modified) = &modified {
            json_ld["dateModified"] = json!(modified);
        }
        if let Some(author) = post.author.as_deref().filter(|a| !a.trim().is_empty()) {
            json_ld["author"] = json!({ "@type": "Person", "name": author });
        }
        if let Some(image) = &image {
            json_ld["image"] = json!([image]);
        }

        Self {
            open_graph: OpenGraph {
                og_type: "article",
                title: title.clone(),
                description: description.clone(),
                url: canonical.clone(),
                site_name: site.name.clone(),
                locale: site.language.replace('-', "_"),
                image_alt: post.main_image.as_ref().and_then(|i| i.alt.clone()),
                image: image.clone(),
                published_time: published,
                modified_time: modified,
                section,
            },
            twitter: TwitterCard {
                card: "summary_large_image",
                title: title.clone(),
                description: description.clone(),
                image,
                site: twitter_site(site),
            },
            title,
            description,
            canonical,
            json_ld,
        }
    }

    /// Metadata for a category listing.
    #[must_use]
    pub fn for_category(category: &Category, site: &SiteConfig) -> Self {
        let path = category.slug.as_ref().map_or_else(
            || "/".to_string(),
            |s| format!("{}/{}", DocumentType::Category.route_prefix(), s),
        );
        let fallback = format!("{} fishing tips, guides and gear advice.", category.title);
        Self::for_page(
            &path,
            &category.title,
            category.description.as_deref().unwrap_or(&fallback),
            site,
        )
    }

    /// Metadata for a technique guide.
    #[must_use]
    pub fn for_technique(technique: &Technique, site: &SiteConfig) -> Self {
        let path = technique.slug.as_ref().map_or_else(
            || "/".to_string(),
            |s| format!("{}/{}", DocumentType::Technique.route_prefix(), s),
        );
        let fallback = format!("How to master {}: step-by-step fishing technique guide.", technique.title);
        Self::for_page(
            &path,
            &technique.title,
            technique.description.as_deref().unwrap_or(&fallback),
            site,
        )
    }

    /// Metadata for a static or listing page.
    #[must_use]
    pub fn for_page(path: &str, title: &str, description: &str, site: &SiteConfig) -> Self {
        let title = page_title(title, &site.name);
        let description = truncate_words(description, DESCRIPTION_MAX);
        let canonical = site.url(path);
        let image = site.default_image.clone();

        let json_ld = json!({
            "@context": "https://schema.org",
            "@type": "WebPage",
            "name": title,
            "description": description,
            "url": canonical,
            "publisher": publisher(site),
        });

        Self {
            open_graph: OpenGraph {
                og_type: "website",
                title: title.clone(),
                description: description.clone(),
                url: canonical.clone(),
                site_name: site.name.clone(),
                locale: site.language.replace('-', "_"),
                image: image.clone(),
                image_alt: None,
                published_time: None,
                modified_time: None,
                section: None,
            },
            twitter: TwitterCard {
                card: "summary_large_image",
                title: title.clone(),
                description: description.clone(),
                image,
                site: twitter_site(site),
            },
            title,
            description,
            canonical,
            json_ld,
        }
    }
}

/// Fetch a document by type and slug and build its metadata.
///
/// Returns `None` when no published document of that type has the slug.
///
/// # Errors
/// Returns the CMS error when the query fails.
pub async fn lookup(
    source: &dyn ContentSource,
    doc_type: DocumentType,
    slug: &Slug,
    site: &SiteConfig,
) -> Result<Option<PageMetadata>> {
    let metadata = match doc_type {
        DocumentType::Post => source
            .post_by_slug(slug)
            .await?
            .map(|post| PageMetadata::for_post(&post, site)),
        DocumentType::Category => source
            .categories()
            .await?
            .into_iter()
            .find(|c| c.slug.as_ref() == Some(slug))
            .map(|c| PageMetadata::for_category(&c, site)),
        DocumentType::Technique => source
            .techniques()
            .await?
            .into_iter()
            .find(|t| t.slug.as_ref() == Some(slug))
            .map(|t| PageMetadata::for_technique(&t, site)),
    };
    Ok(metadata)
}
