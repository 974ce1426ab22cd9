//! HTTP API for the public site.
//!
//! Serves generated documents (`/sitemap.xml`, `/feed.xml`, `/robots.txt`),
//! page metadata, and the form and chat endpoints the site's browser code
//! posts to.

pub mod content;
pub mod error;
pub mod forms;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::{router, serve};
pub use state::AppState;
