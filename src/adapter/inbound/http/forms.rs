//! Newsletter, application and chat endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::application::candidate;
use crate::application::chat::{self, ChatReply, ChatRequest};
use crate::application::newsletter::{SubscribeRequest, UnsubscribeRequest};
use crate::domain::application::ApplicationForm;

/// Unwrap a JSON body, turning extractor rejections into our error shape.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let outcome = state.newsletter.subscribe(body(payload)?, Utc::now()).await?;
    let status = if outcome.is_new() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(json!({ "status": outcome }))))
}

pub async fn unsubscribe(
    State(state): State<AppState>,
    payload: Result<Json<UnsubscribeRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    state.newsletter.unsubscribe(body(payload)?, Utc::now()).await?;
    Ok(Json(json!({ "status": "unsubscribed" })))
}

pub async fn apply(
    State(state): State<AppState>,
    payload: Result<Json<ApplicationForm>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let form = body(payload)?;
    candidate::submit(state.applications.as_deref(), form, Utc::now()).await?;
    Ok(Json(json!({ "status": "received" })))
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let request = body(payload)?;
    let reply = chat::reply(state.llm.as_deref(), &request).await?;
    Ok(Json(reply))
}
