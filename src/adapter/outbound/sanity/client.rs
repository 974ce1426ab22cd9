//! Sanity HTTP API client.
//!
//! Implements [`ContentSource`] over the GROQ query endpoint and
//! [`ContentWriter`] over the mutation endpoint.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use super::dto::{DocumentDto, ErrorResponse, PostDto, QueryResponse, TaxonomyDto};
use super::query;
use crate::domain::{Category, DocumentId, DocumentSummary, DocumentType, Post, Slug, Technique};
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::sanity::SanityConfig;
use crate::port::outbound::cms::{ContentSource, ContentWriter};

const SERVICE: &str = "sanity";

/// Client for one Sanity project/dataset.
#[derive(Debug, Clone)]
pub struct SanityClient {
    client: Client,
    project_id: String,
    dataset: String,
    api_version: String,
    use_cdn: bool,
    token: Option<String>,
}

impl SanityClient {
    /// Create a client from configuration.
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        Self {
            client: Client::new(),
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
            api_version: config.api_version.clone(),
            use_cdn: config.use_cdn,
            token: config.token.clone(),
        }
    }

    /// The CDN cannot serve authenticated requests, so a token forces the
    /// live API host.
    fn host(&self) -> String {
        let api = if self.use_cdn && self.token.is_none() {
            "apicdn"
        } else {
            "api"
        };
        format!("https://{}.{api}.sanity.io", self.project_id)
    }

    /// Build the GET URL for a query. Parameters are JSON-encoded and passed
    /// as `$name=value` pairs.
    pub(crate) fn query_url(&self, groq: &str, params: &[(&str, Value)]) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/v{}/data/query/{}",
            self.host(),
            self.api_version,
            self.dataset
        ))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", groq);
            for (name, value) in params {
                pairs.append_pair(&format!("${name}"), &value.to_string());
            }
        }
        Ok(url)
    }

    pub(crate) fn mutate_url(&self) -> Result<Url> {
        Ok(Url::parse(&format!(
            "https://{}.api.sanity.io/v{}/data/mutate/{}",
            self.project_id, self.api_version, self.dataset
        ))?)
    }

    /// Run a GROQ query and decode its `result`.
    async fn fetch<T: DeserializeOwned>(&self, groq: &str, params: &[(&str, Value)]) -> Result<T> {
        let url = self.query_url(groq, params)?;
        debug!(url = %url, "Sanity query");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        let body: QueryResponse<T> = checked(response).await?.json().await?;
        Ok(body.result)
    }

    /// Submit a mutation batch.
    async fn mutate(&self, mutations: Value) -> Result<()> {
        let token = self.token.as_ref().ok_or(ConfigError::MissingField {
            field: "SANITY_API_TOKEN",
        })?;
        let response = self
            .client
            .post(self.mutate_url()?)
            .bearer_auth(token)
            .json(&json!({ "mutations": mutations }))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        checked(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into an upstream error carrying the API's
/// message.
async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let reason = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.message())
        .unwrap_or(text);
    Err(Error::upstream(SERVICE, format!("{status}: {reason}")))
}

/// Mutation body setting a document's slug.
pub(crate) fn slug_patch(id: &DocumentId, slug: &Slug) -> Value {
    json!([{
        "patch": {
            "id": id.as_str(),
            "set": { "slug": { "_type": "slug", "current": slug.as_str() } }
        }
    }])
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn posts(&self) -> Result<Vec<Post>> {
        let dtos: Vec<PostDto> = self.fetch(query::POSTS, &[]).await?;
        Ok(dtos.into_iter().map(Post::from).collect())
    }

    async fn post_by_slug(&self, slug: &Slug) -> Result<Option<Post>> {
        let dto: Option<PostDto> = self
            .fetch(query::POST_BY_SLUG, &[("slug", json!(slug.as_str()))])
            .await?;
        Ok(dto.map(Post::from))
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let dtos: Vec<TaxonomyDto> = self.fetch(query::CATEGORIES, &[]).await?;
        Ok(dtos.into_iter().map(Category::from).collect())
    }

    async fn techniques(&self) -> Result<Vec<Technique>> {
        let dtos: Vec<TaxonomyDto> = self.fetch(query::TECHNIQUES, &[]).await?;
        Ok(dtos.into_iter().map(Technique::from).collect())
    }

    async fn documents(&self, doc_type: DocumentType) -> Result<Vec<DocumentSummary>> {
        let dtos: Vec<DocumentDto> = self
            .fetch(query::DOCUMENTS, &[("type", json!(doc_type.as_str()))])
            .await?;
        Ok(dtos.into_iter().map(|d| d.into_summary(doc_type)).collect())
    }
}

#[async_trait]
impl ContentWriter for SanityClient {
    async fn set_slug(&self, id: &DocumentId, slug: &Slug) -> Result<()> {
        self.mutate(slug_patch(id, slug)).await?;
        info!(document = %id.as_str(), slug = %slug, "Slug updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> SanityConfig {
        SanityConfig {
            project_id: "abc123".into(),
            token: token.map(String::from),
            ..SanityConfig::default()
        }
    }

    #[test]
    fn query_url_uses_cdn_without_token() {
        let client = SanityClient::new(&config(None));
        let url = client.query_url("*[_type == $type]", &[("type", json!("post"))]).unwrap();

        assert_eq!(url.host_str(), Some("abc123.apicdn.sanity.io"));
        assert_eq!(url.path(), "/v2024-01-01/data/query/production");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("query".into(), "*[_type == $type]".into()));
        assert_eq!(pairs[1], ("$type".into(), "\"post\"".into()));
    }

    #[test]
    fn token_forces_live_api() {
        let client = SanityClient::new(&config(Some("secret")));
        let url = client.query_url("*", &[]).unwrap();
        assert_eq!(url.host_str(), Some("abc123.api.sanity.io"));
    }

    #[test]
    fn mutate_url_always_uses_live_api() {
        let client = SanityClient::new(&config(None));
        assert_eq!(
            client.mutate_url().unwrap().as_str(),
            "https://abc123.api.sanity.io/v2024-01-01/data/mutate/production"
        );
    }

    #[test]
    fn slug_patch_shape() {
        let body = slug_patch(
            &DocumentId::new("post-1"),
            &Slug::parse("bass-lures").unwrap(),
        );
        assert_eq!(body[0]["patch"]["id"], "post-1");
        assert_eq!(body[0]["patch"]["set"]["slug"]["_type"], "slug");
        assert_eq!(body[0]["patch"]["set"]["slug"]["current"], "bass-lures");
    }

    #[tokio::test]
    async fn set_slug_without_token_is_config_error() {
        let client = SanityClient::new(&config(None));
        let err = client
            .set_slug(&DocumentId::new("p"), &Slug::parse("a").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "SANITY_API_TOKEN"
            })
        ));
    }
}
