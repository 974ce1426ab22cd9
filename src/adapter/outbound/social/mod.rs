//! Social platform publishers.

pub mod instagram;
pub mod pinterest;

pub use instagram::Instagram;
pub use pinterest::Pinterest;
