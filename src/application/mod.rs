//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate ports to implement
//! the site's documents, form endpoints, maintenance commands and the social
//! pipeline. None of them know which adapter sits behind a port.

pub mod audit;
pub mod candidate;
pub mod chat;
pub mod duplicates;
pub mod extract;
pub mod feed;
pub mod keywords;
pub mod markup;
pub mod metadata;
pub mod newsletter;
pub mod repair;
pub mod robots;
pub mod sitemap;
pub mod social;
