//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fakes`] — In-memory implementations of every outbound port:
//!   `MemoryCms`, `ScriptedLlm`, `MemorySubscriberStore`, `RecordingSink`,
//!   `FixedPhotoSearch`, `FileRenderer`, `MemoryMediaHost`,
//!   `RecordingPublisher`.
//! - [`domain`] — Builders for posts, categories, techniques and document
//!   summaries.
//! - [`config`] — Canonical test configuration.

pub mod config;
pub mod domain;
pub mod fakes;
