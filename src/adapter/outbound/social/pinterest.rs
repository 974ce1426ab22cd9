//! Pinterest API v5 publisher.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::carousel::{Caption, Platform};
use crate::domain::error::DomainError;
use crate::error::{Error, Result};
use crate::port::outbound::publish::{Published, SocialPublisher};

const PINS_URL: &str = "https://api.pinterest.com/v5/pins";

/// Publishes pins to one board.
#[derive(Debug, Clone)]
pub struct Pinterest {
    client: Client,
    board_id: String,
    access_token: String,
}

#[derive(Debug, Serialize)]
struct PinRequest<'a> {
    board_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    description: String,
    link: &'a str,
    media_source: MediaSource<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "source_type", rename_all = "snake_case")]
enum MediaSource<'a> {
    ImageUrl { url: &'a str },
    MultipleImageUrls { items: Vec<ImageItem<'a>>, index: usize },
}

#[derive(Debug, Serialize)]
struct ImageItem<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct PinResponse {
    id: String,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl Pinterest {
    #[must_use]
    pub fn new(board_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            board_id: board_id.into(),
            access_token: access_token.into(),
        }
    }

    fn request<'a>(&'a self, image_urls: &'a [String], caption: &'a Caption, link: &'a str) -> PinRequest<'a> {
        let media_source = if let [single] = image_urls {
            MediaSource::ImageUrl { url: single.as_str() }
        } else {
            MediaSource::MultipleImageUrls {
                items: image_urls.iter().map(|url| ImageItem { url: url.as_str() }).collect(),
                index: 0,
            }
        };
        PinRequest {
            board_id: &self.board_id,
            title: caption.title.as_deref(),
            description: caption.full_text(),
            link,
            media_source,
        }
    }
}

#[async_trait]
impl SocialPublisher for Pinterest {
    fn platform(&self) -> Platform {
        Platform::Pinterest
    }

    async fn publish(&self, image_urls: &[String], caption: &Caption, link: &str) -> Result<Published> {
        let max = Platform::Pinterest.max_slides();
        if image_urls.is_empty() || image_urls.len() > max {
            return Err(DomainError::SlideCount {
                platform: "pinterest",
                min: 1,
                max,
                count: image_urls.len(),
            }
            .into());
        }

        let response = self
            .client
            .post(PINS_URL)
            .bearer_auth(&self.access_token)
            .json(&self.request(image_urls, caption, link))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let reason = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(Error::upstream("pinterest", format!("{status}: {reason}")));
        }

        let pin: PinResponse = serde_json::from_str(&text)?;
        info!(pin_id = %pin.id, items = image_urls.len(), "Published to Pinterest");
        Ok(Published {
            permalink: Some(format!("https://www.pinterest.com/pin/{}/", pin.id)),
            remote_id: pin.id,
        })
    }
}
