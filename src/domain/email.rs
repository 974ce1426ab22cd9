//! Email address value object.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// A normalized (trimmed, lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalize and validate an email address.
    ///
    /// The check is shallow: one `@`, a non-empty local part
    /// without whitespace, and a dotted domain without empty labels.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEmail`] when the address fails any check.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let normalized = value.trim().to_lowercase();
        let invalid = || DomainError::InvalidEmail {
            value: value.trim().to_string(),
        };

        if normalized.is_empty()
            || normalized.len() > MAX_EMAIL_LEN
            || normalized.chars().any(char::is_whitespace)
        {
            return Err(invalid());
        }

        let (local, domain) = normalized.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') || !domain.contains('.') {
            return Err(invalid());
        }
        if domain.split('.').any(str::is_empty) {
            return Err(invalid());
        }

        Ok(Self(normalized))
    }

    /// Get the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = Email::parse("  Angler@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "angler@example.com");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "angler",
            "@example.com",
            "angler@",
            "angler@example",
            "angler@@example.com",
            "angler@example..com",
            "angler@.example.com",
            "ang ler@example.com",
        ] {
            assert!(Email::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn rejects_overlong_addresses() {
        let local = "a".repeat(250);
        assert!(Email::parse(&format!("{local}@example.com")).is_err());
    }

    #[test]
    fn accepts_plus_addressing_and_subdomains() {
        assert!(Email::parse("angler+news@mail.example.co.uk").is_ok());
    }
}
