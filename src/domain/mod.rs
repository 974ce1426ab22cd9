//! Domain types: CMS content, value objects, subscribers and carousels.
//!
//! Nothing in this module performs I/O; adapters map external payloads into
//! these types and application services operate on them.

pub mod application;
pub mod carousel;
pub mod content;
pub mod email;
pub mod error;
pub mod id;
pub mod redirect;
pub mod seo;
pub mod slug;
pub mod subscriber;

pub use content::{Category, CategoryRef, DocumentSummary, DocumentType, Image, Post, Technique};
pub use email::Email;
pub use id::{DocumentId, SubscriberId};
pub use slug::Slug;
