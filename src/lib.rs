//! FishandTips - content backend and operator tooling for a fishing blog.
//!
//! Articles, categories and techniques live in a Sanity dataset. This crate
//! reads them over GROQ and turns them into everything the public site and
//! its editors need around the content itself.
//!
//! # Architecture
//!
//! The crate is laid out hexagonally:
//!
//! - **`domain`** - Content documents, slugs, subscribers, carousels. No I/O.
//! - **`port::outbound`** - Traits for the CMS, LLM, subscriber store, form
//!   webhooks, stock photos, slide rendering, media CDN and social publishers
//! - **`adapter::outbound`** - Sanity, Anthropic/OpenAI, SQLite (Diesel),
//!   webhooks, Unsplash, headless Chromium, Cloudinary, Instagram, Pinterest
//! - **`application`** - Sitemap, RSS feed, robots.txt, page metadata,
//!   SEO/slug/redirect audits, slug repair, newsletter, applications, chat,
//!   duplicate and keyword tools, the carousel pipeline
//! - **`adapter::inbound`** - The axum HTTP API and the `fishandtips` CLI
//! - **`infrastructure`** - TOML configuration and service wiring
//!
//! # Features
//!
//! - `testkit` - In-memory fakes and fixtures for integration tests
//!
//! # Example
//!
//! ```no_run
//! use fishandtips::application::robots;
//! use fishandtips::infrastructure::config::settings::Config;
//!
//! let config = Config::load("config.toml")?;
//! println!("{}", robots::render(&config.site, &config.robots));
//! # Ok::<(), fishandtips::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
