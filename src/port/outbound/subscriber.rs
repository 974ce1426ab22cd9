//! Persistence port for newsletter subscribers.

use async_trait::async_trait;

use crate::domain::subscriber::{Subscriber, SubscriptionStatus};
use crate::domain::Email;
use crate::error::Result;

/// Storage operations for subscribers.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Insert or replace a subscriber, keyed by email.
    async fn save(&self, subscriber: &Subscriber) -> Result<()>;

    /// Look up a subscriber by email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Subscriber>>;

    /// Look up a subscriber by unsubscribe token.
    async fn find_by_token(&self, token: &str) -> Result<Option<Subscriber>>;

    /// List subscribers, optionally filtered by status, oldest first.
    async fn list(&self, status: Option<SubscriptionStatus>) -> Result<Vec<Subscriber>>;

    /// Count subscribers with a status.
    async fn count(&self, status: SubscriptionStatus) -> Result<usize>;
}
