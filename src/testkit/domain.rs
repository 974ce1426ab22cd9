//! Builders for content used across tests.
//!
//! Provides concise factory functions for [`Post`], [`Category`],
//! [`Technique`] and [`DocumentSummary`] so tests focus on assertions
//! rather than construction boilerplate.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{
    Category, CategoryRef, DocumentId, DocumentSummary, DocumentType, Image, Post, Slug, Technique,
};

/// Reference instant used by fixtures: 2024-06-01 12:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Parse a slug, panicking on invalid input.
pub fn slug(value: &str) -> Slug {
    match Slug::parse(value) {
        Ok(slug) => slug,
        Err(e) => panic!("invalid test slug {value}: {e}"),
    }
}

/// A published post with sensible SEO fields, `days_ago` days before
/// [`now`].
pub fn post(slug_value: &str, title: &str, days_ago: i64) -> Post {
    let published = now() - chrono::Duration::days(days_ago);
    Post {
        id: DocumentId::new(format!("post-{slug_value}")),
        title: title.to_string(),
        slug: Some(slug(slug_value)),
        excerpt: Some(format!("Everything you need to know about {}.", title.to_lowercase())),
        meta_title: None,
        meta_description: None,
        published_at: Some(published),
        updated_at: Some(published + chrono::Duration::hours(6)),
        main_image: Some(Image {
            url: format!("https://cdn.sanity.io/images/test/production/{slug_value}.jpg"),
            alt: Some(title.to_string()),
        }),
        author: Some("Riley Banks".into()),
        categories: vec![CategoryRef {
            title: "Bass Fishing".into(),
            slug: Some(slug("bass-fishing")),
        }],
        body_text: format!(
            "{title} starts with reading the water. Fish the edges early. Move to deeper cover at midday."
        ),
    }
}

/// A post without a slug.
pub fn unslugged_post(id: &str, title: &str) -> Post {
    Post {
        id: DocumentId::new(id),
        slug: None,
        ..post("placeholder", title, 1)
    }
}

/// A category.
pub fn category(slug_value: &str, title: &str) -> Category {
    Category {
        id: DocumentId::new(format!("category-{slug_value}")),
        title: title.to_string(),
        slug: Some(slug(slug_value)),
        description: Some(format!("{title} tips and guides.")),
        updated_at: Some(now()),
    }
}

/// A fishing technique guide.
pub fn technique(slug_value: &str, title: &str) -> Technique {
    Technique {
        id: DocumentId::new(format!("technique-{slug_value}")),
        title: title.to_string(),
        slug: Some(slug(slug_value)),
        description: None,
        updated_at: None,
    }
}

/// A raw document listing entry.
pub fn summary(doc_type: DocumentType, id: &str, title: Option<&str>, slug: Option<&str>) -> DocumentSummary {
    DocumentSummary {
        id: DocumentId::new(id),
        doc_type,
        title: title.map(str::to_string),
        slug: slug.map(str::to_string),
    }
}
