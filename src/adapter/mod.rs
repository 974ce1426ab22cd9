//! Implementations of ports (hexagonal adapters).
//!
//! - `inbound`: drivers of the application (HTTP API, CLI)
//! - `outbound`: driven services (CMS, LLMs, storage, social platforms)

pub mod inbound;
pub mod outbound;
