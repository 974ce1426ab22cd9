//! Shared handler state.

use std::sync::Arc;

use crate::application::newsletter::Newsletter;
use crate::infrastructure::config::site::{FeedConfig, RobotsConfig, SiteConfig};
use crate::port::outbound::cms::ContentSource;
use crate::port::outbound::form::FormSink;
use crate::port::outbound::llm::Llm;

/// Immutable state cloned into every handler.
///
/// Optional integrations stay `None` when their credentials are absent; the
/// affected endpoints then answer with 503 or a fallback.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ContentSource>,
    pub newsletter: Arc<Newsletter>,
    pub applications: Option<Arc<dyn FormSink>>,
    pub llm: Option<Arc<dyn Llm>>,
    pub site: Arc<SiteConfig>,
    pub feed: Arc<FeedConfig>,
    pub robots: Arc<RobotsConfig>,
}

impl AppState {
    pub fn new(source: Arc<dyn ContentSource>, newsletter: Arc<Newsletter>, site: SiteConfig) -> Self {
        Self {
            source,
            newsletter,
            applications: None,
            llm: None,
            site: Arc::new(site),
            feed: Arc::new(FeedConfig::default()),
            robots: Arc::new(RobotsConfig::default()),
        }
    }

    #[must_use]
    pub fn with_applications(mut self, sink: Arc<dyn FormSink>) -> Self {
        self.applications = Some(sink);
        self
    }

    #[must_use]
    pub fn with_llm(mut self, llm: Arc<dyn Llm>) -> Self {
        self.llm = Some(llm);
        self
    }

    #[must_use]
    pub fn with_feed(mut self, feed: FeedConfig) -> Self {
        self.feed = Arc::new(feed);
        self
    }

    #[must_use]
    pub fn with_robots(mut self, robots: RobotsConfig) -> Self {
        self.robots = Arc::new(robots);
        self
    }
}
