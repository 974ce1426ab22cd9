//! Infrastructure bootstrap helpers for runtime wiring.
//!
//! Every optional integration is built only when its credentials are
//! present; a missing credential is logged and the integration stays off.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::adapter::inbound::http::AppState;
use crate::adapter::outbound::chromium::ChromiumRenderer;
use crate::adapter::outbound::cloudinary::Cloudinary;
use crate::adapter::outbound::llm::{Anthropic, OpenAi};
use crate::adapter::outbound::sanity::SanityClient;
use crate::adapter::outbound::social::{Instagram, Pinterest};
use crate::adapter::outbound::sqlite::database::connection;
use crate::adapter::outbound::sqlite::SqliteSubscriberStore;
use crate::adapter::outbound::unsplash::Unsplash;
use crate::adapter::outbound::webhook::WebhookSink;
use crate::application::newsletter::Newsletter;
use crate::application::social::{CarouselPipeline, SlideStyle};
use crate::domain::carousel::Platform;
use crate::error::{Error, Result};
use crate::infrastructure::config::llm::LlmProvider;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::form::FormSink;
use crate::port::outbound::llm::Llm;
use crate::port::outbound::media::MediaHost;
use crate::port::outbound::photo::PhotoSearch;
use crate::port::outbound::publish::SocialPublisher;
use crate::port::outbound::subscriber::SubscriberStore;

fn env_key(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Build the configured LLM client, or `None` when disabled or unkeyed.
pub fn build_llm(config: &Config) -> Option<Arc<dyn Llm>> {
    let provider = config.llm.provider;
    let Some(var) = provider.api_key_var() else {
        debug!("LLM disabled by configuration");
        return None;
    };
    let Some(api_key) = env_key(var) else {
        warn!(provider = %provider, "{var} not set, LLM features disabled");
        return None;
    };

    let client: Arc<dyn Llm> = match provider {
        LlmProvider::Anthropic => Arc::new(Anthropic::from_config(api_key, &config.llm.anthropic)),
        LlmProvider::OpenAi => Arc::new(OpenAi::from_config(api_key, &config.llm.openai)),
        LlmProvider::Disabled => return None,
    };

    info!(provider = client.name(), "LLM client initialized");
    Some(client)
}

/// Build the CMS client.
pub fn build_cms(config: &Config) -> Arc<SanityClient> {
    Arc::new(SanityClient::new(&config.sanity))
}

/// Open the subscriber database, running pending migrations.
///
/// # Errors
/// Returns a database error if the file cannot be opened or migrated.
pub fn build_subscriber_store(config: &Config) -> Result<Arc<dyn SubscriberStore>> {
    let pool = connection::open(&config.database)?;
    info!(path = %config.database, "Subscriber database ready");
    Ok(Arc::new(SqliteSubscriberStore::new(pool)))
}

/// Build the newsletter service over the configured store.
///
/// # Errors
/// Returns a database error if the store cannot be opened.
pub fn build_newsletter(config: &Config) -> Result<Newsletter> {
    let store = build_subscriber_store(config)?;
    let mirror = config
        .forms
        .newsletter_webhook_url
        .as_deref()
        .map(|url| Arc::new(WebhookSink::new(url, "newsletter webhook")) as Arc<dyn FormSink>);
    Ok(Newsletter::new(store, mirror))
}

/// Build the spreadsheet sink for candidate applications.
pub fn build_application_sink(config: &Config) -> Option<Arc<dyn FormSink>> {
    match config.forms.sheets_webhook_url.as_deref() {
        Some(url) => Some(Arc::new(WebhookSink::new(url, "sheets webhook"))),
        None => {
            warn!("SHEETS_WEBHOOK_URL not set, applications will be rejected");
            None
        }
    }
}

/// Assemble the HTTP handler state.
///
/// # Errors
/// Returns a database error if the subscriber store cannot be opened.
pub fn build_app_state(config: &Config) -> Result<AppState> {
    let newsletter = build_newsletter(config)?;
    let mut state = AppState::new(build_cms(config), Arc::new(newsletter), config.site.clone())
        .with_feed(config.feed.clone())
        .with_robots(config.robots.clone());
    if let Some(sink) = build_application_sink(config) {
        state = state.with_applications(sink);
    }
    if let Some(llm) = build_llm(config) {
        state = state.with_llm(llm);
    }
    Ok(state)
}

/// Build the stock photo search, when keyed.
pub fn build_photo_search(config: &Config) -> Option<Arc<dyn PhotoSearch>> {
    let unsplash = &config.social.unsplash;
    let Some(key) = unsplash.access_key.as_deref() else {
        warn!("UNSPLASH_ACCESS_KEY not set, slides use solid backgrounds");
        return None;
    };
    Some(Arc::new(Unsplash::new(key, unsplash.orientation.as_str())))
}

/// Build the media CDN client, when fully configured.
pub fn build_media_host(config: &Config) -> Option<Arc<dyn MediaHost>> {
    let cdn = &config.social.cloudinary;
    match (&cdn.cloud_name, &cdn.api_key, &cdn.api_secret) {
        (Some(cloud), Some(key), Some(secret)) => Some(Arc::new(Cloudinary::new(
            cloud.as_str(),
            key.as_str(),
            secret.as_str(),
            cdn.folder.as_str(),
        ))),
        _ => {
            debug!("Cloudinary not configured");
            None
        }
    }
}

/// Build the publisher for `platform`, when configured.
pub fn build_publisher(config: &Config, platform: Platform) -> Option<Arc<dyn SocialPublisher>> {
    match platform {
        Platform::Instagram => {
            let ig = &config.social.instagram;
            match (&ig.account_id, &ig.access_token) {
                (Some(account), Some(token)) => Some(Arc::new(Instagram::new(
                    account.as_str(),
                    token.as_str(),
                    ig.graph_version.as_str(),
                ))),
                _ => None,
            }
        }
        Platform::Pinterest => {
            let pin = &config.social.pinterest;
            match (&pin.board_id, &pin.access_token) {
                (Some(board), Some(token)) => {
                    Some(Arc::new(Pinterest::new(board.as_str(), token.as_str())))
                }
                _ => None,
            }
        }
    }
}

/// Slide look derived from site and social settings.
pub fn slide_style(config: &Config) -> SlideStyle {
    SlideStyle {
        site_name: config.site.name.clone(),
        accent_color: config.social.accent_color.clone(),
        cta_text: config.social.cta_text.clone(),
    }
}

/// Build the carousel pipeline for `platform`.
///
/// Publishing collaborators are attached when configured; the pipeline
/// itself reports their absence when a non-dry run needs them.
///
/// # Errors
/// Returns [`Error::Unavailable`] when no LLM is configured.
pub fn build_pipeline(config: &Config, platform: Platform) -> Result<CarouselPipeline> {
    let llm = build_llm(config).ok_or(Error::Unavailable("LLM provider"))?;
    let social = &config.social;
    let renderer = Arc::new(ChromiumRenderer::new(
        social.chrome_path.as_str(),
        Duration::from_secs(social.render_timeout_secs),
    ));

    let mut pipeline = CarouselPipeline::new(
        build_cms(config),
        llm,
        renderer,
        config.site.clone(),
        slide_style(config),
        social.work_dir.clone(),
    );
    if let Some(photos) = build_photo_search(config) {
        pipeline = pipeline.with_photos(photos);
    }
    if let Some(media) = build_media_host(config) {
        pipeline = pipeline.with_media(media);
    }
    if let Some(publisher) = build_publisher(config, platform) {
        pipeline = pipeline.with_publisher(publisher);
    }
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[test]
    fn disabled_provider_builds_no_llm() {
        let mut config = testkit::config::config();
        config.llm.provider = LlmProvider::Disabled;
        assert!(build_llm(&config).is_none());
    }

    #[test]
    fn publishers_need_credentials() {
        let mut config = testkit::config::config();
        assert!(build_publisher(&config, Platform::Pinterest).is_none());

        config.social.pinterest.board_id = Some("board".into());
        config.social.pinterest.access_token = Some("token".into());
        assert!(build_publisher(&config, Platform::Pinterest).is_some());
        assert!(build_publisher(&config, Platform::Instagram).is_none());
    }

    #[test]
    fn media_host_needs_every_cloudinary_field() {
        let mut config = testkit::config::config();
        config.social.cloudinary.cloud_name = Some("demo".into());
        config.social.cloudinary.api_key = Some("key".into());
        assert!(build_media_host(&config).is_none());
        config.social.cloudinary.api_secret = Some("secret".into());
        assert!(build_media_host(&config).is_some());
    }

    #[test]
    fn pipeline_requires_llm() {
        let mut config = testkit::config::config();
        config.llm.provider = LlmProvider::Disabled;
        assert!(matches!(
            build_pipeline(&config, Platform::Instagram),
            Err(Error::Unavailable(_))
        ));
    }
}
