//! HTTP API tests against the router with in-memory collaborators.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use fishandtips::adapter::inbound::http::{router, AppState};
use fishandtips::application::newsletter::Newsletter;
use fishandtips::domain::subscriber::SubscriptionStatus;
use fishandtips::port::outbound::form::FormSink;
use fishandtips::testkit::config::site;
use fishandtips::testkit::domain::{category, post, technique};
use fishandtips::testkit::fakes::{MemoryCms, MemorySubscriberStore, RecordingSink, ScriptedLlm};

struct Harness {
    app: Router,
    store: Arc<MemorySubscriberStore>,
}

fn cms() -> MemoryCms {
    MemoryCms::new()
        .with_posts(vec![
            post("spring-bass-patterns", "Spring Bass Patterns", 3),
            post("night-catfish-rigs", "Night Catfish Rigs & Baits", 10),
        ])
        .with_categories(vec![category("bass-fishing", "Bass Fishing")])
        .with_techniques(vec![technique("drop-shot", "Drop Shot")])
}

fn harness(build: impl FnOnce(AppState) -> AppState) -> Harness {
    let store = Arc::new(MemorySubscriberStore::default());
    let newsletter = Newsletter::new(store.clone(), None);
    let state = build(AppState::new(Arc::new(cms()), Arc::new(newsletter), site()));
    Harness {
        app: router(state, &[]),
        store,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::get(uri).body(Body::empty()).expect("request")).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let (status, text) = send(app, request).await;
    (status, serde_json::from_str(&text).unwrap_or(Value::Null))
}

#[tokio::test]
async fn health_reports_ok() {
    let h = harness(|s| s);
    let (status, body) = get(&h.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn sitemap_lists_every_document_type() {
    let h = harness(|s| s);
    let (status, xml) = get(&h.app, "/sitemap.xml").await;
    assert_eq!(status, StatusCode::OK);
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<loc>https://www.fishandtips.com/blog/spring-bass-patterns</loc>"));
    assert!(xml.contains("<loc>https://www.fishandtips.com/categories/bass-fishing</loc>"));
    assert!(xml.contains("<loc>https://www.fishandtips.com/fishing-techniques/drop-shot</loc>"));
}

#[tokio::test]
async fn feed_escapes_titles() {
    let h = harness(|s| s);
    let (status, xml) = get(&h.app, "/feed.xml").await;
    assert_eq!(status, StatusCode::OK);
    assert!(xml.contains("Night Catfish Rigs &amp; Baits"));
    assert!(!xml.contains("Rigs & Baits"));
}

#[tokio::test]
async fn robots_points_at_sitemap() {
    let h = harness(|s| s);
    let (status, text) = get(&h.app, "/robots.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("Sitemap: https://www.fishandtips.com/sitemap.xml"));
}

#[tokio::test]
async fn metadata_for_known_post() {
    let h = harness(|s| s);
    let (status, body) = get(&h.app, "/api/metadata/posts/spring-bass-patterns").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["canonical"], "https://www.fishandtips.com/blog/spring-bass-patterns");
    assert_eq!(body["open_graph"]["type"], "article");
}

#[tokio::test]
async fn metadata_for_category_and_technique_pages() {
    let h = harness(|s| s);

    let (status, text) = get(&h.app, "/api/metadata/categories/bass-fishing").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["canonical"], "https://www.fishandtips.com/categories/bass-fishing");
    assert_eq!(body["description"], "Bass Fishing tips and guides.");
    assert_eq!(body["open_graph"]["type"], "website");

    let (status, text) = get(&h.app, "/api/metadata/techniques/drop-shot").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["title"], "Drop Shot | FishandTips");
    assert_eq!(body["canonical"], "https://www.fishandtips.com/fishing-techniques/drop-shot");
    assert!(body["description"].as_str().unwrap().contains("Drop Shot"));

    let (status, _) = get(&h.app, "/api/metadata/techniques/bass-fishing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metadata_for_unknown_post_is_404() {
    let h = harness(|s| s);
    let (status, _) = get(&h.app, "/api/metadata/posts/no-such-post").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metadata_for_malformed_slug_is_404() {
    let h = harness(|s| s);
    let (status, text) = get(&h.app, "/api/metadata/posts/Bass_Tips").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["status"], 404);
    assert!(body["error"].as_str().unwrap().contains("Bass_Tips"));
}

#[tokio::test]
async fn subscribe_then_repeat_then_unsubscribe() {
    let h = harness(|s| s);
    let body = json!({ "email": "Angler@Example.com", "source": "footer" });

    let (status, reply) = post_json(&h.app, "/api/newsletter/subscribe", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reply["status"], "subscribed");

    let (status, reply) = post_json(&h.app, "/api/newsletter/subscribe", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["status"], "already_subscribed");
    assert_eq!(h.store.len(), 1);

    let (status, _) = post_json(
        &h.app,
        "/api/newsletter/unsubscribe",
        json!({ "email": "angler@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.store.all()[0].status, SubscriptionStatus::Unsubscribed);
}

#[tokio::test]
async fn subscribe_rejects_bad_email() {
    let h = harness(|s| s);
    let (status, reply) =
        post_json(&h.app, "/api/newsletter/subscribe", json!({ "email": "not-an-email" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply["status"], 400);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn malformed_json_uses_error_shape() {
    let h = harness(|s| s);
    let request = Request::post("/api/newsletter/subscribe")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, text) = send(&h.app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unsubscribe_unknown_token_is_404() {
    let h = harness(|s| s);
    let (status, _) =
        post_json(&h.app, "/api/newsletter/unsubscribe", json!({ "token": "nope" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn application() -> Value {
    json!({
        "name": "Avery Quinn",
        "email": "avery@example.com",
        "position": "Gear reviewer",
        "experience": "Ten years of tournament bass fishing",
        "message": "I would love to review spinning reels."
    })
}

#[tokio::test]
async fn application_is_forwarded_to_sink() {
    let sink = Arc::new(RecordingSink::default());
    let shared = sink.clone() as Arc<dyn FormSink>;
    let h = harness(move |s| s.with_applications(shared));

    let (status, reply) = post_json(&h.app, "/api/applications", application()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["status"], "received");
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["formType"], "application");
    assert_eq!(records[0]["email"], "avery@example.com");
}

#[tokio::test]
async fn application_lists_invalid_fields() {
    let sink = Arc::new(RecordingSink::default());
    let shared = sink.clone() as Arc<dyn FormSink>;
    let h = harness(move |s| s.with_applications(shared));

    let (status, reply) =
        post_json(&h.app, "/api/applications", json!({ "name": "Avery", "email": "bad" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = reply["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"position"));
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn application_without_sink_is_503() {
    let h = harness(|s| s);
    let (status, _) = post_json(&h.app, "/api/applications", application()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn application_sink_failure_is_502() {
    let shared = Arc::new(RecordingSink::failing()) as Arc<dyn FormSink>;
    let h = harness(move |s| s.with_applications(shared));
    let (status, _) = post_json(&h.app, "/api/applications", application()).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn chat_without_llm_falls_back() {
    let h = harness(|s| s);
    let (status, reply) =
        post_json(&h.app, "/api/chat", json!({ "message": "Best bait for crappie?" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["fallback"], true);
}

#[tokio::test]
async fn chat_relays_model_reply() {
    let llm = Arc::new(ScriptedLlm::new(["  Try small jigs near brush piles.  "]));
    let h = harness(move |s| s.with_llm(llm));
    let (status, reply) =
        post_json(&h.app, "/api/chat", json!({ "message": "Best bait for crappie?" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["reply"], "Try small jigs near brush piles.");
    assert_eq!(reply["fallback"], false);
}

#[tokio::test]
async fn chat_rejects_empty_message() {
    let h = harness(|s| s);
    let (status, _) = post_json(&h.app, "/api/chat", json!({ "message": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
