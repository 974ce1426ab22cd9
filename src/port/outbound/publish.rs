//! Social publishing port.

use async_trait::async_trait;

use crate::domain::carousel::{Caption, Platform};
use crate::error::Result;

/// Identifier and link of a published post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub remote_id: String,
    pub permalink: Option<String>,
}

/// Publishes already-hosted images to a social platform.
#[async_trait]
pub trait SocialPublisher: Send + Sync {
    /// Platform this publisher posts to.
    fn platform(&self) -> Platform;

    /// Publish the images (in order) with the caption, linking back to `link`
    /// where the platform supports it.
    async fn publish(&self, image_urls: &[String], caption: &Caption, link: &str) -> Result<Published>;
}
