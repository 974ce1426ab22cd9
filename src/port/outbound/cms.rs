//! CMS ports: read queries and slug patches.

use async_trait::async_trait;

use crate::domain::{Category, DocumentId, DocumentSummary, DocumentType, Post, Slug, Technique};
use crate::error::Result;

/// Read access to published CMS content.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// All posts, newest first.
    async fn posts(&self) -> Result<Vec<Post>>;

    /// A single post by slug.
    async fn post_by_slug(&self, slug: &Slug) -> Result<Option<Post>>;

    /// All categories.
    async fn categories(&self) -> Result<Vec<Category>>;

    /// All fishing technique guides.
    async fn techniques(&self) -> Result<Vec<Technique>>;

    /// Every document of a type with its raw slug value (possibly missing or
    /// invalid).
    async fn documents(&self, doc_type: DocumentType) -> Result<Vec<DocumentSummary>>;
}

/// Write access for repair commands.
#[async_trait]
pub trait ContentWriter: Send + Sync {
    /// Set the slug of a document.
    async fn set_slug(&self, id: &DocumentId, slug: &Slug) -> Result<()>;
}
