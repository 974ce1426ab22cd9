//! SQLite persistence adapters.
//!
//! Stores newsletter subscribers using Diesel ORM.

pub mod database;
pub mod subscriber;

pub use subscriber::SqliteSubscriberStore;
