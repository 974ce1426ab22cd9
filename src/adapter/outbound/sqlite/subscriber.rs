//! SQLite subscriber store implementation.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::SubscriberRow;
use crate::adapter::outbound::sqlite::database::schema::subscribers;
use crate::domain::subscriber::{Subscriber, SubscriptionStatus};
use crate::domain::{Email, SubscriberId};
use crate::error::{Error, Result};
use crate::port::outbound::subscriber::SubscriberStore;

/// SQLite-backed [`SubscriberStore`].
pub struct SqliteSubscriberStore {
    pool: DbPool,
}

impl SqliteSubscriberStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(subscriber: &Subscriber) -> SubscriberRow {
        SubscriberRow {
            id: subscriber.id.as_str().to_string(),
            email: subscriber.email.as_str().to_string(),
            name: subscriber.name.clone(),
            source: subscriber.source.clone(),
            status: subscriber.status.as_str().to_string(),
            unsubscribe_token: subscriber.unsubscribe_token.clone(),
            subscribed_at: timestamp(subscriber.subscribed_at),
            unsubscribed_at: subscriber.unsubscribed_at.map(timestamp),
        }
    }

    fn from_row(row: SubscriberRow) -> Result<Subscriber> {
        let status = SubscriptionStatus::from_name(&row.status)
            .ok_or_else(|| Error::Parse(format!("unknown subscriber status '{}'", row.status)))?;
        Ok(Subscriber {
            id: SubscriberId::from(row.id),
            email: Email::parse(&row.email)?,
            name: row.name,
            source: row.source,
            status,
            unsubscribe_token: row.unsubscribe_token,
            subscribed_at: parse_time(&row.subscribed_at)?,
            unsubscribed_at: row.unsubscribed_at.as_deref().map(parse_time).transpose()?,
        })
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

/// Fixed-width UTC timestamps keep text ordering chronological.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("invalid timestamp '{value}': {e}")))
}

#[async_trait]
impl SubscriberStore for SqliteSubscriberStore {
    async fn save(&self, subscriber: &Subscriber) -> Result<()> {
        let row = Self::to_row(subscriber);
        let mut conn = self.conn()?;

        // Upsert on the id only: a second record for the same email or token
        // violates its UNIQUE constraint instead of replacing the first.
        diesel::insert_into(subscribers::table)
            .values(&row)
            .on_conflict(subscribers::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                    Error::Conflict(format!("subscriber {}: {}", row.email, info.message()))
                }
                other => Error::Database(other.to_string()),
            })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Subscriber>> {
        let mut conn = self.conn()?;

        let row: Option<SubscriberRow> = subscribers::table
            .filter(subscribers::email.eq(email.as_str()))
            .select(SubscriberRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Subscriber>> {
        let mut conn = self.conn()?;

        let row: Option<SubscriberRow> = subscribers::table
            .filter(subscribers::unsubscribe_token.eq(token))
            .select(SubscriberRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn list(&self, status: Option<SubscriptionStatus>) -> Result<Vec<Subscriber>> {
        let mut conn = self.conn()?;

        let mut query = subscribers::table
            .select(SubscriberRow::as_select())
            .order(subscribers::subscribed_at.asc())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(subscribers::status.eq(status.as_str()));
        }
        let rows: Vec<SubscriberRow> = query
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn count(&self, status: SubscriptionStatus) -> Result<usize> {
        let mut conn = self.conn()?;

        let count: i64 = subscribers::table
            .filter(subscribers::status.eq(status.as_str()))
            .count()
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        usize::try_from(count).map_err(|e| Error::Database(e.to_string()))
    }
}
