//! Instagram Graph API publisher.
//!
//! Carousels are published in three steps: one child container per image
//! (`is_carousel_item=true`), a `CAROUSEL` container referencing the
//! children, then `media_publish` on that container.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::carousel::{Caption, Platform};
use crate::domain::error::DomainError;
use crate::error::{Error, Result};
use crate::port::outbound::publish::{Published, SocialPublisher};

const GRAPH_BASE: &str = "https://graph.facebook.com";

/// Publishes to one Instagram business account.
#[derive(Debug, Clone)]
pub struct Instagram {
    client: Client,
    account_id: String,
    access_token: String,
    graph_version: String,
}

#[derive(Deserialize)]
struct IdResponse {
    id: String,
}

#[derive(Deserialize)]
struct PermalinkResponse {
    #[serde(default)]
    permalink: Option<String>,
}

#[derive(Deserialize)]
struct GraphError {
    error: GraphErrorDetail,
}

#[derive(Deserialize)]
struct GraphErrorDetail {
    message: String,
}

impl Instagram {
    #[must_use]
    pub fn new(
        account_id: impl Into<String>,
        access_token: impl Into<String>,
        graph_version: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            account_id: account_id.into(),
            access_token: access_token.into(),
            graph_version: graph_version.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{GRAPH_BASE}/{}/{path}", self.graph_version)
    }

    async fn post_form(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let mut form: Vec<(&str, &str)> = params.to_vec();
        form.push(("access_token", self.access_token.as_str()));

        let response = self
            .client
            .post(self.url(path))
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let reason = serde_json::from_str::<GraphError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(Error::upstream("instagram", format!("{status}: {reason}")));
        }
        Ok(serde_json::from_str::<IdResponse>(&text)?.id)
    }

    async fn permalink(&self, media_id: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(self.url(media_id))
            .query(&[("fields", "permalink"), ("access_token", self.access_token.as_str())])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<PermalinkResponse>().await?.permalink)
    }
}

#[async_trait]
impl SocialPublisher for Instagram {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn publish(&self, image_urls: &[String], caption: &Caption, _link: &str) -> Result<Published> {
        let max = Platform::Instagram.max_slides();
        if image_urls.is_empty() || image_urls.len() > max {
            return Err(DomainError::SlideCount {
                platform: "instagram",
                min: 1,
                max,
                count: image_urls.len(),
            }
            .into());
        }

        let media_path = format!("{}/media", self.account_id);
        let text = caption.full_text();

        let container = if let [single] = image_urls {
            self.post_form(&media_path, &[("image_url", single.as_str()), ("caption", text.as_str())])
                .await?
        } else {
            let mut children = Vec::with_capacity(image_urls.len());
            for url in image_urls {
                let id = self
                    .post_form(&media_path, &[("image_url", url.as_str()), ("is_carousel_item", "true")])
                    .await?;
                debug!(child = %id, "Created carousel item");
                children.push(id);
            }
            let children = children.join(",");
            self.post_form(
                &media_path,
                &[
                    ("media_type", "CAROUSEL"),
                    ("children", children.as_str()),
                    ("caption", text.as_str()),
                ],
            )
            .await?
        };

        let media_id = self
            .post_form(
                &format!("{}/media_publish", self.account_id),
                &[("creation_id", container.as_str())],
            )
            .await?;
        info!(media_id = %media_id, items = image_urls.len(), "Published to Instagram");

        let permalink = match self.permalink(&media_id).await {
            Ok(link) => link,
            Err(e) => {
                warn!(media_id = %media_id, error = %e, "Could not fetch permalink");
                None
            }
        };

        Ok(Published {
            remote_id: media_id,
            permalink,
        })
    }
}
