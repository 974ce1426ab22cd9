//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by `parse`/`try_new` constructors that validate
//! inputs.
//!
//! # Examples
//!
//! ```
//! use fishandtips::domain::error::DomainError;
//! use fishandtips::domain::slug::Slug;
//!
//! let result = Slug::parse("Not A Slug");
//! assert!(matches!(result, Err(DomainError::InvalidSlug { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Slug is empty, too long, or contains characters outside `[a-z0-9-]`.
    #[error("invalid slug '{value}': {reason}")]
    InvalidSlug {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Email address failed validation.
    #[error("invalid email address '{value}'")]
    InvalidEmail {
        /// The rejected value.
        value: String,
    },

    /// A required field was blank.
    #[error("{field} is required")]
    MissingField {
        /// Name of the blank field.
        field: &'static str,
    },

    /// A field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the field.
        field: &'static str,
        /// Maximum allowed length in characters.
        max: usize,
    },

    /// Carousel slide count outside the platform's supported range.
    #[error("{platform} carousels need between {min} and {max} slides, got {count}")]
    SlideCount {
        /// Platform name.
        platform: &'static str,
        /// Minimum slide count.
        min: usize,
        /// Maximum slide count.
        max: usize,
        /// Actual slide count.
        count: usize,
    },
}
