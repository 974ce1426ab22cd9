//! Inbound adapters (driving side).
//!
//! - `http`: axum router serving the site's API and generated documents
//! - `cli`: the `fishandtips` operator command line

pub mod cli;
pub mod http;
