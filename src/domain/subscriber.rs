//! Newsletter subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::SubscriberId;

/// Subscription lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Unsubscribed,
}

impl SubscriptionStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Unsubscribed => "unsubscribed",
        }
    }

    /// Parse the storage representation.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "active" => Some(Self::Active),
            "unsubscribed" => Some(Self::Unsubscribed),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A newsletter subscriber record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: Email,
    pub name: Option<String>,
    /// Where the signup came from (footer form, popup, article CTA...).
    pub source: Option<String>,
    pub status: SubscriptionStatus,
    pub unsubscribe_token: String,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

impl Subscriber {
    /// Create a new active subscriber with fresh identifiers.
    #[must_use]
    pub fn new(email: Email, name: Option<String>, source: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: SubscriberId::generate(),
            email,
            name: clean(name),
            source: clean(source),
            status: SubscriptionStatus::Active,
            unsubscribe_token: uuid::Uuid::new_v4().to_string(),
            subscribed_at: now,
            unsubscribed_at: None,
        }
    }

    /// True while the subscriber receives the newsletter.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Mark the subscriber as unsubscribed.
    pub fn unsubscribe(&mut self, now: DateTime<Utc>) {
        self.status = SubscriptionStatus::Unsubscribed;
        self.unsubscribed_at = Some(now);
    }

    /// Reactivate a previously unsubscribed subscriber.
    pub fn resubscribe(&mut self, name: Option<String>, now: DateTime<Utc>) {
        self.status = SubscriptionStatus::Active;
        self.unsubscribed_at = None;
        self.subscribed_at = now;
        if let Some(name) = clean(name) {
            self.name = Some(name);
        }
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
