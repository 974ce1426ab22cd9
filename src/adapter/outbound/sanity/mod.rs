//! Sanity CMS adapter.
//!
//! - `query`: GROQ query constants
//! - `dto`: wire types and their mapping into domain content
//! - `client`: HTTP client implementing the CMS ports

pub mod client;
pub mod dto;
pub mod query;

pub use client::SanityClient;
