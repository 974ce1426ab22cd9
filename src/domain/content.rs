//! Content entities read from the CMS.
//!
//! These are exchange-agnostic views of CMS documents: the Sanity adapter maps
//! its query results into them, and every application service consumes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::DocumentId;
use super::slug::Slug;

/// CMS document types the crate reads and patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Blog article.
    #[serde(rename = "post")]
    Post,
    /// Article category.
    #[serde(rename = "category")]
    Category,
    /// Fishing technique guide.
    #[serde(rename = "fishingTechnique")]
    Technique,
}

impl DocumentType {
    /// All document types, in sitemap order.
    pub const ALL: [Self; 3] = [Self::Post, Self::Category, Self::Technique];

    /// The `_type` value used in the CMS.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Category => "category",
            Self::Technique => "fishingTechnique",
        }
    }

    /// Public path prefix for documents of this type.
    #[must_use]
    pub const fn route_prefix(self) -> &'static str {
        match self {
            Self::Post => "/blog",
            Self::Category => "/categories",
            Self::Technique => "/fishing-techniques",
        }
    }

    /// Parse the CMS `_type` value (also accepts `technique`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "post" => Some(Self::Post),
            "category" => Some(Self::Category),
            "fishingTechnique" | "technique" => Some(Self::Technique),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image reference with its alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub alt: Option<String>,
}

/// Lightweight category reference embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub title: String,
    pub slug: Option<Slug>,
}

/// A blog article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: DocumentId,
    pub title: String,
    pub slug: Option<Slug>,
    pub excerpt: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub main_image: Option<Image>,
    pub author: Option<String>,
    pub categories: Vec<CategoryRef>,
    /// Plain text of the body.
    pub body_text: String,
}

impl Post {
    /// Title used for search results: the SEO title when set, else the title.
    #[must_use]
    pub fn seo_title(&self) -> &str {
        non_blank(self.meta_title.as_deref()).unwrap_or(&self.title)
    }

    /// Description used for search results: the meta description, else the
    /// excerpt.
    #[must_use]
    pub fn seo_description(&self) -> Option<&str> {
        non_blank(self.meta_description.as_deref()).or_else(|| non_blank(self.excerpt.as_deref()))
    }

    /// Most recent modification time known for the post.
    #[must_use]
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.published_at)
    }

    /// True when the post has a publish date that is not in the future.
    #[must_use]
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.published_at.is_some_and(|at| at <= now)
    }

    /// Title of the first category, if any.
    #[must_use]
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(|c| c.title.as_str())
    }
}

/// An article category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: DocumentId,
    pub title: String,
    pub slug: Option<Slug>,
    pub description: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A fishing technique guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technique {
    pub id: DocumentId,
    pub title: String,
    pub slug: Option<Slug>,
    pub description: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Minimal projection of any document, used by slug audits and repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub doc_type: DocumentType,
    pub title: Option<String>,
    /// Raw slug value as stored, which may be invalid.
    pub slug: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post() -> Post {
        Post {
            id: DocumentId::new("p1"),
            title: "Catching Pike in Winter".into(),
            slug: Some(Slug::parse("pike-winter").unwrap()),
            excerpt: Some("How to find pike under the ice.".into()),
            meta_title: None,
            meta_description: Some("  ".into()),
            published_at: Some(Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()),
            updated_at: None,
            main_image: None,
            author: None,
            categories: vec![],
            body_text: String::new(),
        }
    }

    #[test]
    fn seo_fields_fall_back_when_blank() {
        let post = post();
        assert_eq!(post.seo_title(), "Catching Pike in Winter");
        assert_eq!(post.seo_description(), Some("How to find pike under the ice."));
    }

    #[test]
    fn last_modified_prefers_updated_at() {
        let mut post = post();
        assert_eq!(post.last_modified(), post.published_at);
        let later = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        post.updated_at = Some(later);
        assert_eq!(post.last_modified(), Some(later));
    }

    #[test]
    fn future_posts_are_not_published() {
        let post = post();
        let before = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        assert!(!post.is_published_at(before));
        assert!(post.is_published_at(after));
    }

    #[test]
    fn document_type_names_round_trip() {
        for doc_type in DocumentType::ALL {
            assert_eq!(DocumentType::from_name(doc_type.as_str()), Some(doc_type));
        }
        assert_eq!(DocumentType::from_name("technique"), Some(DocumentType::Technique));
        assert_eq!(DocumentType::from_name("author"), None);
    }
}
