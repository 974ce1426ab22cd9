//! Stock photo search port.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// A stock photo suitable for a slide background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockPhoto {
    pub url: String,
    /// Photographer credit shown on the slide.
    pub credit: Option<String>,
}

/// Search for a photo matching a query.
#[async_trait]
pub trait PhotoSearch: Send + Sync {
    /// Return the best match, or `None` when nothing matched.
    async fn find(&self, query: &str) -> Result<Option<StockPhoto>>;
}
