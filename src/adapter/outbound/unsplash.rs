//! Unsplash stock photo search.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::port::outbound::photo::{PhotoSearch, StockPhoto};

const SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// Unsplash search client.
#[derive(Debug, Clone)]
pub struct Unsplash {
    client: Client,
    access_key: String,
    orientation: String,
}

impl Unsplash {
    #[must_use]
    pub fn new(access_key: impl Into<String>, orientation: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_key: access_key.into(),
            orientation: orientation.into(),
        }
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        Ok(Url::parse_with_params(
            SEARCH_URL,
            &[
                ("query", query),
                ("orientation", self.orientation.as_str()),
                ("per_page", "1"),
                ("content_filter", "high"),
            ],
        )?)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    urls: PhotoUrls,
    #[serde(default)]
    user: Option<Photographer>,
}

#[derive(Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Deserialize)]
struct Photographer {
    name: String,
}

impl From<Photo> for StockPhoto {
    fn from(photo: Photo) -> Self {
        Self {
            url: photo.urls.regular,
            credit: photo.user.map(|u| format!("Photo: {} / Unsplash", u.name)),
        }
    }
}

#[async_trait]
impl PhotoSearch for Unsplash {
    async fn find(&self, query: &str) -> Result<Option<StockPhoto>> {
        let response = self
            .client
            .get(self.search_url(query)?)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream("unsplash", format!("{status}: {body}")));
        }

        let body: SearchResponse = response.json().await?;
        let photo = body.results.into_iter().next().map(StockPhoto::from);
        debug!(query, found = photo.is_some(), "Unsplash search");
        Ok(photo)
    }
}
