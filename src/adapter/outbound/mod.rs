//! Outbound adapters (driven side).
//!
//! Each module implements one or more ports from
//! [`crate::port::outbound`] against a concrete service.

pub mod chromium;
pub mod cloudinary;
pub mod llm;
pub mod sanity;
pub mod social;
pub mod sqlite;
pub mod unsplash;
pub mod webhook;
