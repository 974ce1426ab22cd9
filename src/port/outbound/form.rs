//! Form submission sink (spreadsheet webhook).

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Destination for website form submissions.
#[async_trait]
pub trait FormSink: Send + Sync {
    /// Forward a flat JSON record.
    async fn submit(&self, record: &Value) -> Result<()>;
}
