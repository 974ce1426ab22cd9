//! Per-post SEO audit.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use super::Tally;
use crate::domain::seo::{check_description, check_image, check_slug, check_title, Check, Severity};
use crate::domain::{DocumentId, DocumentType, Post};
use crate::error::Result;
use crate::port::outbound::cms::ContentSource;

/// Checks for one post.
#[derive(Debug, Clone, Serialize)]
pub struct PostAudit {
    pub id: DocumentId,
    pub title: String,
    pub slug: Option<String>,
    pub checks: Vec<Check>,
}

impl PostAudit {
    /// Most severe outcome among the checks.
    #[must_use]
    pub fn worst(&self) -> Severity {
        self.checks
            .iter()
            .map(|c| c.severity)
            .max()
            .unwrap_or(Severity::Pass)
    }
}

/// Audit of every post.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeoReport {
    pub posts: Vec<PostAudit>,
}

impl SeoReport {
    /// Counts over every individual check.
    #[must_use]
    pub fn tally(&self) -> Tally {
        self.posts
            .iter()
            .flat_map(|p| p.checks.iter().map(|c| c.severity))
            .collect()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.tally().has_failures()
    }
}

/// Audit one post. `raw_slug` is the slug as stored in the CMS, which may be
/// present but invalid.
#[must_use]
pub fn audit_post(post: &Post, raw_slug: Option<&str>) -> PostAudit {
    let mut checks = vec![
        check_title(post.seo_title()),
        check_description(post.seo_description()),
        check_slug(raw_slug),
    ];
    checks.extend(check_image(post.main_image.as_ref()));

    PostAudit {
        id: post.id.clone(),
        title: post.title.clone(),
        slug: raw_slug.map(str::to_string),
        checks,
    }
}

/// Audit a set of posts against their raw slugs.
#[must_use]
pub fn audit_posts(posts: &[Post], raw_slugs: &HashMap<DocumentId, Option<String>>) -> SeoReport {
    let posts = posts
        .iter()
        .map(|post| {
            let raw = raw_slugs
                .get(&post.id)
                .cloned()
                .unwrap_or_else(|| post.slug.as_ref().map(|s| s.as_str().to_string()));
            audit_post(post, raw.as_deref())
        })
        .collect();
    SeoReport { posts }
}

/// Fetch posts and audit them.
///
/// # Errors
/// Returns an error if the CMS cannot be read.
pub async fn run(source: &dyn ContentSource) -> Result<SeoReport> {
    let posts = source.posts().await?;
    let raw_slugs: HashMap<DocumentId, Option<String>> = source
        .documents(DocumentType::Post)
        .await?
        .into_iter()
        .map(|d| (d.id, d.slug))
        .collect();

    let report = audit_posts(&posts, &raw_slugs);
    let tally = report.tally();
    info!(posts = report.posts.len(), warn = tally.warn, fail = tally.fail, "SEO audit complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seo::SeoField;
    use crate::domain::{Image, Slug};

    fn post(title: &str, description: Option<&str>) -> Post {
        Post {
            id: DocumentId::new("p1"),
            title: title.into(),
            slug: Some(Slug::parse("a-post").unwrap()),
            excerpt: None,
            meta_title: None,
            meta_description: description.map(String::from),
            published_at: None,
            updated_at: None,
            main_image: Some(Image {
                url: "https://cdn/x.jpg".into(),
                alt: Some("alt".into()),
            }),
            author: None,
            categories: vec![],
            body_text: String::new(),
        }
    }

    fn severity(audit: &PostAudit, field: SeoField) -> Severity {
        audit.checks.iter().find(|c| c.field == field).unwrap().severity
    }

    #[test]
    fn healthy_post_passes_everything() {
        let audit = audit_post(
            &post(&"t".repeat(45), Some(&"d".repeat(140))),
            Some("a-post"),
        );
        assert_eq!(audit.worst(), Severity::Pass);
    }

    #[test]
    fn title_boundaries() {
        for (len, expected) in [(59, Severity::Pass), (60, Severity::Pass), (61, Severity::Fail)] {
            let audit = audit_post(&post(&"t".repeat(len), Some(&"d".repeat(140))), Some("a"));
            assert_eq!(severity(&audit, SeoField::Title), expected, "length {len}");
        }
    }

    #[test]
    fn description_boundaries() {
        let at_max = audit_post(&post(&"t".repeat(40), Some(&"d".repeat(160))), Some("a"));
        assert_eq!(severity(&at_max, SeoField::Description), Severity::Pass);
        let over = audit_post(&post(&"t".repeat(40), Some(&"d".repeat(161))), Some("a"));
        assert_eq!(severity(&over, SeoField::Description), Severity::Fail);
        let missing = audit_post(&post(&"t".repeat(40), None), Some("a"));
        assert_eq!(severity(&missing, SeoField::Description), Severity::Fail);
    }

    #[test]
    fn invalid_raw_slug_fails_even_if_post_slug_dropped() {
        let mut p = post(&"t".repeat(40), Some(&"d".repeat(130)));
        p.slug = None;
        let mut raw = HashMap::new();
        raw.insert(p.id.clone(), Some("Bad Slug".to_string()));

        let report = audit_posts(&[p], &raw);
        assert_eq!(severity(&report.posts[0], SeoField::Slug), Severity::Fail);
        assert!(report.has_failures());
    }
}
