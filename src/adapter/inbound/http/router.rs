//! Route table and server loop.

use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::state::AppState;
use super::{content, forms};
use crate::error::Result;

/// Build the application router.
///
/// `allowed_origins` restricts CORS to the listed origins; an empty list
/// allows any origin.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(content::health))
        .route("/sitemap.xml", get(content::sitemap_xml))
        .route("/feed.xml", get(content::feed_xml))
        .route("/robots.txt", get(content::robots_txt))
        .route("/api/metadata/posts/{slug}", get(content::post_metadata))
        .route("/api/metadata/categories/{slug}", get(content::category_metadata))
        .route("/api/metadata/techniques/{slug}", get(content::technique_metadata))
        .route("/api/newsletter/subscribe", post(forms::subscribe))
        .route("/api/newsletter/unsubscribe", post(forms::unsubscribe))
        .route("/api/applications", post(forms::apply))
        .route("/api/chat", post(forms::chat))
        .layer(cors(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Serve `app` on `addr` until Ctrl-C.
///
/// # Errors
/// Returns an I/O error if the address cannot be bound.
pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
