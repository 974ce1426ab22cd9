//! Generated documents and page metadata.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use super::error::ApiResult;
use super::state::AppState;
use crate::application::metadata::{self, PageMetadata};
use crate::application::{feed, robots, sitemap};
use crate::domain::{DocumentType, Slug};
use crate::error::Error;

const XML: &str = "application/xml; charset=utf-8";
const RSS: &str = "application/rss+xml; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn sitemap_xml(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let xml = sitemap::generate(state.source.as_ref(), &state.site, today).await?;
    Ok(([(header::CONTENT_TYPE, XML)], xml))
}

pub async fn feed_xml(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let xml = feed::generate(state.source.as_ref(), &state.site, &state.feed, Utc::now()).await?;
    Ok(([(header::CONTENT_TYPE, RSS)], xml))
}

pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, TEXT)], robots::render(&state.site, &state.robots))
}

pub async fn post_metadata(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PageMetadata>> {
    document_metadata(&state, DocumentType::Post, &slug).await
}

pub async fn category_metadata(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PageMetadata>> {
    document_metadata(&state, DocumentType::Category, &slug).await
}

pub async fn technique_metadata(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PageMetadata>> {
    document_metadata(&state, DocumentType::Technique, &slug).await
}

async fn document_metadata(
    state: &AppState,
    doc_type: DocumentType,
    slug: &str,
) -> ApiResult<Json<PageMetadata>> {
    let not_found = || Error::NotFound(format!("{} '{slug}'", doc_type.as_str()));
    // A path segment that is not a valid slug cannot name a document.
    let slug = Slug::parse(slug).map_err(|_| not_found())?;
    let metadata = metadata::lookup(state.source.as_ref(), doc_type, &slug, &state.site)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(metadata))
}
