//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::subscribers;

/// Database row for a newsletter subscriber.
///
/// Timestamps are stored as RFC 3339 text.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = subscribers)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubscriberRow {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub unsubscribe_token: String,
    pub subscribed_at: String,
    pub unsubscribed_at: Option<String>,
}
