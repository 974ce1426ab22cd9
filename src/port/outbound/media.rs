//! Media CDN port.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// An uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Provider identifier used for deletion.
    pub public_id: String,
    /// Public HTTPS URL.
    pub url: String,
}

/// Hosts images at public URLs for the social APIs to fetch.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Upload a local file.
    async fn upload(&self, path: &Path) -> Result<UploadedMedia>;

    /// Delete a previously uploaded asset.
    async fn delete(&self, public_id: &str) -> Result<()>;
}
