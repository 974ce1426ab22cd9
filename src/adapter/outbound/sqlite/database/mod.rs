//! SQLite database modules.
//!
//! Connection pooling and migrations, the Diesel schema, and row types.

pub mod connection;
pub mod model;
pub mod schema;
