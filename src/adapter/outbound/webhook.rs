//! Spreadsheet webhook form sink.
//!
//! Google Apps Script web apps accept a JSON body and answer with a
//! redirect to the script's result page, which reqwest follows.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::outbound::form::FormSink;

/// Posts form records to a webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: Client,
    url: String,
    service: &'static str,
}

impl WebhookSink {
    /// Create a sink for `url`. `service` names the target in errors and logs.
    #[must_use]
    pub fn new(url: impl Into<String>, service: &'static str) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            service,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FormSink for WebhookSink {
    async fn submit(&self, record: &Value) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|e| Error::upstream(self.service, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(self.service, format!("{status}: {body}")));
        }
        debug!(service = self.service, "Form record delivered");
        Ok(())
    }
}
