//! Content maintenance audits.
//!
//! Each audit produces findings graded with
//! [`Severity`](crate::domain::seo::Severity); the CLI exits non-zero when
//! any finding is a `Fail`.

pub mod redirect;
pub mod seo;
pub mod slug;
pub mod tally;

pub use tally::Tally;
