//! Wire types for Sanity query results and their mapping into domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{
    Category, CategoryRef, DocumentId, DocumentSummary, DocumentType, Image, Post, Slug, Technique,
};

/// Envelope returned by the query endpoint.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub result: T,
}

/// Error body returned by the API on 4xx/5xx.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Best human-readable message in the body.
    #[must_use]
    pub fn message(&self) -> String {
        self.error
            .description
            .clone()
            .or_else(|| self.error.message.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub main_image: Option<ImageDto>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<CategoryRefDto>>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageDto {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryRefDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Shape shared by categories and techniques.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaxonomyDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Parse a CMS timestamp: RFC 3339 datetimes or bare `YYYY-MM-DD` dates.
#[must_use]
pub fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Validate a slug read from the CMS. Invalid slugs are logged and dropped so
/// they never produce broken routes.
fn checked_slug(id: &str, raw: Option<String>) -> Option<Slug> {
    let raw = raw?;
    match Slug::parse(raw) {
        Ok(slug) => Some(slug),
        Err(e) => {
            warn!(document = id, error = %e, "Ignoring invalid slug");
            None
        }
    }
}

impl From<PostDto> for Post {
    fn from(dto: PostDto) -> Self {
        let slug = checked_slug(&dto.id, dto.slug);
        let main_image = dto.main_image.and_then(|img| {
            img.url.map(|url| Image {
                url,
                alt: img.alt.filter(|a| !a.trim().is_empty()),
            })
        });
        let categories = dto
            .categories
            .unwrap_or_default()
            .into_iter()
            .filter_map(|c| {
                let title = c.title?;
                Some(CategoryRef {
                    slug: c.slug.and_then(|s| Slug::parse(s).ok()),
                    title,
                })
            })
            .collect();

        Self {
            title: dto.title.unwrap_or_default(),
            slug,
            excerpt: dto.excerpt,
            meta_title: dto.meta_title,
            meta_description: dto.meta_description,
            published_at: parse_timestamp(dto.published_at.as_deref()),
            updated_at: parse_timestamp(dto.updated_at.as_deref()),
            main_image,
            author: dto.author,
            categories,
            body_text: dto.body.unwrap_or_default(),
            id: DocumentId::new(dto.id),
        }
    }
}

impl From<TaxonomyDto> for Category {
    fn from(dto: TaxonomyDto) -> Self {
        Self {
            slug: checked_slug(&dto.id, dto.slug),
            title: dto.title.unwrap_or_default(),
            description: dto.description,
            updated_at: parse_timestamp(dto.updated_at.as_deref()),
            id: DocumentId::new(dto.id),
        }
    }
}

impl From<TaxonomyDto> for Technique {
    fn from(dto: TaxonomyDto) -> Self {
        Self {
            slug: checked_slug(&dto.id, dto.slug),
            title: dto.title.unwrap_or_default(),
            description: dto.description,
            updated_at: parse_timestamp(dto.updated_at.as_deref()),
            id: DocumentId::new(dto.id),
        }
    }
}

impl DocumentDto {
    /// Convert to a summary, keeping the raw slug. Unknown `_type` values
    /// fall back to the requested type.
    #[must_use]
    pub fn into_summary(self, requested: DocumentType) -> DocumentSummary {
        DocumentSummary {
            doc_type: DocumentType::from_name(&self.doc_type).unwrap_or(requested),
            id: DocumentId::new(self.id),
            title: self.title,
            slug: self.slug,
        }
    }
}
