//! URL slugs for CMS documents.
//!
//! A [`Slug`] is the URL-safe identifier used to build page routes
//! (`/blog/{slug}`). Valid slugs are lowercase ASCII alphanumerics joined by
//! single hyphens, at most [`MAX_SLUG_LEN`] characters.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Maximum slug length, matching the CMS slug field's default `maxLength`.
pub const MAX_SLUG_LEN: usize = 96;

/// A validated URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate an existing slug value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSlug`] if the value is empty, longer than
    /// [`MAX_SLUG_LEN`], or not of the form `word(-word)*` over `[a-z0-9]`.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let reason = if value.is_empty() {
            Some("slug is empty")
        } else if value.len() > MAX_SLUG_LEN {
            Some("slug is longer than 96 characters")
        } else if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            Some("only lowercase letters, digits and hyphens are allowed")
        } else if value.starts_with('-') || value.ends_with('-') || value.contains("--") {
            Some("hyphens must separate words")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidSlug { value, reason }),
            None => Ok(Self(value)),
        }
    }

    /// Derive a slug from free text such as a post title.
    ///
    /// Returns `None` when the text contains nothing sluggable.
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        let slug = slugify(title);
        if slug.is_empty() {
            None
        } else {
            Some(Self(slug))
        }
    }

    /// Return a slug that does not collide with `taken`, appending `-2`,
    /// `-3`, ... as needed while staying within [`MAX_SLUG_LEN`].
    #[must_use]
    pub fn unique_among(&self, taken: &HashSet<String>) -> Self {
        if !taken.contains(&self.0) {
            return self.clone();
        }
        let mut n = 2usize;
        loop {
            let suffix = format!("-{n}");
            let base = truncate_at_hyphen(&self.0, MAX_SLUG_LEN - suffix.len());
            let candidate = format!("{base}{suffix}");
            if !taken.contains(&candidate) {
                return Self(candidate);
            }
            n += 1;
        }
    }

    /// Get the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

/// Convert free text to slug form.
///
/// Lowercases, folds common Latin accents to ASCII, replaces every other
/// character with a hyphen, collapses runs of hyphens and truncates to
/// [`MAX_SLUG_LEN`] at a word boundary.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        // Apostrophes join words: "angler's" -> "anglers".
        if c == '\'' || c == '\u{2019}' {
            continue;
        }
        for c in fold_accent(c).chars() {
            if c.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c);
            } else {
                pending_hyphen = true;
            }
        }
    }

    truncate_at_hyphen(&out, MAX_SLUG_LEN).to_string()
}

fn truncate_at_hyphen(slug: &str, max: usize) -> &str {
    if slug.len() <= max {
        return slug;
    }
    let cut = &slug[..max];
    match cut.rfind('-') {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.trim_end_matches('-'),
    }
}

fn fold_accent(c: char) -> &'static str {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' => "a",
        'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        '&' => " and ",
        _ => ascii_str(c),
    }
}

fn ascii_str(c: char) -> &'static str {
    const ASCII: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
    match ASCII.find(c) {
        Some(idx) => &ASCII[idx..=idx],
        None => " ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_hyphenated_words() {
        let slug = Slug::parse("best-bass-lures-2024").unwrap();
        assert_eq!(slug.as_str(), "best-bass-lures-2024");
    }

    #[test]
    fn parse_rejects_uppercase_and_spaces() {
        assert!(Slug::parse("Best Bass").is_err());
        assert!(Slug::parse("best_bass").is_err());
    }

    #[test]
    fn parse_rejects_bad_hyphenation() {
        assert!(Slug::parse("-bass").is_err());
        assert!(Slug::parse("bass-").is_err());
        assert!(Slug::parse("bass--lures").is_err());
        assert!(Slug::parse("").is_err());
    }

    #[test]
    fn parse_enforces_max_length() {
        let ok = "a".repeat(MAX_SLUG_LEN);
        let too_long = "a".repeat(MAX_SLUG_LEN + 1);
        assert!(Slug::parse(ok).is_ok());
        assert!(Slug::parse(too_long).is_err());
    }

    #[test]
    fn slugify_handles_punctuation_and_accents() {
        assert_eq!(slugify("  Fly Fishing: A Beginner's Guide!  "), "fly-fishing-a-beginners-guide");
        assert_eq!(slugify("Pêche à la Truite"), "peche-a-la-truite");
        assert_eq!(slugify("Rods & Reels"), "rods-and-reels");
    }

    #[test]
    fn slugify_output_is_always_a_valid_slug() {
        for title in ["Top 10 Lures (2024)", "Ice -- Fishing", "Ünïcödé Tröut"] {
            let slug = slugify(title);
            assert!(Slug::parse(slug.clone()).is_ok(), "{slug}");
        }
    }

    #[test]
    fn slugify_truncates_on_word_boundary() {
        let title = "walleye ".repeat(30);
        let slug = slugify(&title);
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(slug.ends_with("walleye"));
    }

    #[test]
    fn from_title_returns_none_for_symbols_only() {
        assert!(Slug::from_title("!!! ???").is_none());
    }

    #[test]
    fn unique_among_appends_counter() {
        let slug = Slug::parse("trout-tips").unwrap();
        let mut taken = HashSet::new();
        assert_eq!(slug.unique_among(&taken).as_str(), "trout-tips");

        taken.insert("trout-tips".to_string());
        taken.insert("trout-tips-2".to_string());
        assert_eq!(slug.unique_among(&taken).as_str(), "trout-tips-3");
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<Slug, _> = serde_json::from_str("\"carp-bait\"");
        let bad: Result<Slug, _> = serde_json::from_str("\"Carp Bait\"");
        assert!(ok.is_ok());
        assert!(bad.is_err());
    }
}
