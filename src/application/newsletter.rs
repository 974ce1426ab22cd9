//! Newsletter signup and unsubscribe flow.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::subscriber::{Subscriber, SubscriptionStatus};
use crate::domain::Email;
use crate::error::{Error, Result};
use crate::port::outbound::form::FormSink;
use crate::port::outbound::subscriber::SubscriberStore;

/// Signup request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub source: Option<String>,
}

/// Unsubscribe request body: either field identifies the subscriber.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: Option<String>,
    pub token: Option<String>,
}

/// Result of a signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
    Resubscribed,
}

impl SubscribeOutcome {
    /// True when a new record was created.
    #[must_use]
    pub const fn is_new(self) -> bool {
        matches!(self, Self::Subscribed)
    }
}

/// Newsletter service over a subscriber store and an optional mirror sink.
pub struct Newsletter {
    store: Arc<dyn SubscriberStore>,
    sink: Option<Arc<dyn FormSink>>,
}

impl Newsletter {
    pub fn new(store: Arc<dyn SubscriberStore>, sink: Option<Arc<dyn FormSink>>) -> Self {
        Self { store, sink }
    }

    /// Subscribe an address, reactivating it if it had unsubscribed.
    ///
    /// # Errors
    /// Returns a domain error for a missing or invalid email, or a storage
    /// error.
    pub async fn subscribe(&self, request: SubscribeRequest, now: DateTime<Utc>) -> Result<SubscribeOutcome> {
        let raw = request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(DomainError::MissingField { field: "email" })?;
        let email = Email::parse(raw)?;

        let (subscriber, outcome) = match self.store.find_by_email(&email).await? {
            Some(existing) if existing.is_active() => {
                info!(email = %email, "Already subscribed");
                return Ok(SubscribeOutcome::AlreadySubscribed);
            }
            Some(mut existing) => {
                existing.resubscribe(request.name.clone(), now);
                (existing, SubscribeOutcome::Resubscribed)
            }
            None => (
                Subscriber::new(email, request.name.clone(), request.source.clone(), now),
                SubscribeOutcome::Subscribed,
            ),
        };

        match self.store.save(&subscriber).await {
            Ok(()) => {}
            // A concurrent signup stored this email between lookup and save.
            Err(Error::Conflict(reason)) if outcome.is_new() => {
                info!(email = %subscriber.email, reason = %reason, "Already subscribed");
                return Ok(SubscribeOutcome::AlreadySubscribed);
            }
            Err(e) => return Err(e),
        }
        info!(email = %subscriber.email, outcome = ?outcome, "Newsletter signup stored");
        self.mirror(&subscriber, now).await;
        Ok(outcome)
    }

    async fn mirror(&self, subscriber: &Subscriber, now: DateTime<Utc>) {
        let Some(sink) = &self.sink else { return };
        let record = json!({
            "formType": "newsletter",
            "email": subscriber.email.as_str(),
            "name": subscriber.name.as_deref().unwrap_or_default(),
            "source": subscriber.source.as_deref().unwrap_or_default(),
            "timestamp": now.to_rfc3339(),
        });
        if let Err(e) = sink.submit(&record).await {
            warn!(email = %subscriber.email, error = %e, "Newsletter webhook failed");
        }
    }

    /// Unsubscribe by email or token.
    ///
    /// # Errors
    /// Returns a domain error when neither field is given or the email is
    /// invalid, and [`Error::NotFound`] for an unknown subscriber.
    pub async fn unsubscribe(&self, request: UnsubscribeRequest, now: DateTime<Utc>) -> Result<()> {
        let token = request.token.as_deref().map(str::trim).filter(|t| !t.is_empty());
        let email = request.email.as_deref().map(str::trim).filter(|e| !e.is_empty());

        let found = match (token, email) {
            (Some(token), _) => self.store.find_by_token(token).await?,
            (None, Some(email)) => self.store.find_by_email(&Email::parse(email)?).await?,
            (None, None) => return Err(DomainError::MissingField { field: "email or token" }.into()),
        };
        let mut subscriber = found.ok_or_else(|| Error::NotFound("subscriber".into()))?;

        if subscriber.is_active() {
            subscriber.unsubscribe(now);
            self.store.save(&subscriber).await?;
            info!(email = %subscriber.email, "Unsubscribed");
        }
        Ok(())
    }

    /// Subscribers, optionally filtered by status.
    ///
    /// # Errors
    /// Returns a storage error.
    pub async fn list(&self, status: Option<SubscriptionStatus>) -> Result<Vec<Subscriber>> {
        self.store.list(status).await
    }

    /// Count of subscribers with a status.
    ///
    /// # Errors
    /// Returns a storage error.
    pub async fn count(&self, status: SubscriptionStatus) -> Result<usize> {
        self.store.count(status).await
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render subscribers as CSV with a header row.
#[must_use]
pub fn to_csv(subscribers: &[Subscriber]) -> String {
    let mut out = String::from("email,name,source,status,subscribed_at,unsubscribed_at\n");
    for s in subscribers {
        let row = [
            csv_field(s.email.as_str()),
            csv_field(s.name.as_deref().unwrap_or_default()),
            csv_field(s.source.as_deref().unwrap_or_default()),
            s.status.as_str().to_string(),
            s.subscribed_at.to_rfc3339(),
            s.unsubscribed_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
