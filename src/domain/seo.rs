//! SEO field limits and classification.
//!
//! Lengths are counted in Unicode scalar values, which is what search engines
//! truncate on closely enough for audit purposes.

use serde::Serialize;

/// Longest title that still passes.
pub const TITLE_MAX: usize = 60;
/// Titles shorter than this produce a warning.
pub const TITLE_MIN: usize = 30;
/// Longest description that still passes.
pub const DESCRIPTION_MAX: usize = 160;
/// Descriptions shorter than this produce a warning.
pub const DESCRIPTION_MIN: usize = 120;

/// Audit outcome for a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Pass,
    Warn,
    Fail,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pass => "pass",
            Self::Warn => "warn",
            Self::Fail => "fail",
        })
    }
}

/// Which field a check looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoField {
    Title,
    Description,
    Slug,
    MainImage,
    ImageAlt,
}

impl std::fmt::Display for SeoField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Slug => "slug",
            Self::MainImage => "main image",
            Self::ImageAlt => "image alt",
        })
    }
}

/// Result of one SEO check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub field: SeoField,
    pub severity: Severity,
    pub message: String,
}

impl Check {
    #[must_use]
    pub fn new(field: SeoField, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            field,
            severity,
            message: message.into(),
        }
    }
}

/// Length in characters, ignoring surrounding whitespace.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}

/// Classify a page title against [`TITLE_MIN`]..=[`TITLE_MAX`].
#[must_use]
pub fn check_title(title: &str) -> Check {
    let len = char_len(title);
    if len == 0 {
        Check::new(SeoField::Title, Severity::Fail, "title is empty")
    } else if len > TITLE_MAX {
        Check::new(
            SeoField::Title,
            Severity::Fail,
            format!("title is {len} characters (max {TITLE_MAX})"),
        )
    } else if len < TITLE_MIN {
        Check::new(
            SeoField::Title,
            Severity::Warn,
            format!("title is {len} characters (recommended at least {TITLE_MIN})"),
        )
    } else {
        Check::new(SeoField::Title, Severity::Pass, format!("title is {len} characters"))
    }
}

/// Classify a meta description against
/// [`DESCRIPTION_MIN`]..=[`DESCRIPTION_MAX`].
#[must_use]
pub fn check_description(description: Option<&str>) -> Check {
    let Some(description) = description.filter(|d| !d.trim().is_empty()) else {
        return Check::new(SeoField::Description, Severity::Fail, "description is missing");
    };
    let len = char_len(description);
    if len > DESCRIPTION_MAX {
        Check::new(
            SeoField::Description,
            Severity::Fail,
            format!("description is {len} characters (max {DESCRIPTION_MAX})"),
        )
    } else if len < DESCRIPTION_MIN {
        Check::new(
            SeoField::Description,
            Severity::Warn,
            format!("description is {len} characters (recommended at least {DESCRIPTION_MIN})"),
        )
    } else {
        Check::new(
            SeoField::Description,
            Severity::Pass,
            format!("description is {len} characters"),
        )
    }
}

/// Classify a raw slug value.
#[must_use]
pub fn check_slug(slug: Option<&str>) -> Check {
    match slug {
        None => Check::new(SeoField::Slug, Severity::Fail, "slug is missing"),
        Some(raw) => match super::slug::Slug::parse(raw) {
            Ok(_) => Check::new(SeoField::Slug, Severity::Pass, "slug is valid"),
            Err(e) => Check::new(SeoField::Slug, Severity::Fail, e.to_string()),
        },
    }
}

/// Classify a post's main image: missing image and missing alt text are
/// warnings.
#[must_use]
pub fn check_image(image: Option<&super::content::Image>) -> Vec<Check> {
    match image {
        None => vec![Check::new(
            SeoField::MainImage,
            Severity::Warn,
            "main image is missing",
        )],
        Some(image) => {
            let alt = if image.alt.as_deref().is_some_and(|a| !a.trim().is_empty()) {
                Check::new(SeoField::ImageAlt, Severity::Pass, "image has alt text")
            } else {
                Check::new(SeoField::ImageAlt, Severity::Warn, "image has no alt text")
            };
            vec![
                Check::new(SeoField::MainImage, Severity::Pass, "main image is set"),
                alt,
            ]
        }
    }
}

/// Truncate text to at most `max` characters on a word boundary, appending
/// an ellipsis when anything was cut.
#[must_use]
pub fn truncate_words(text: &str, max: usize) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= max {
        return text;
    }
    let budget = max.saturating_sub(1);
    let mut out = String::new();
    for word in text.split(' ') {
        let needed = if out.is_empty() { 0 } else { 1 } + word.chars().count();
        if out.chars().count() + needed > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    if out.is_empty() {
        out = text.chars().take(budget).collect();
    }
    let out = out.trim_end_matches(|c: char| c == ',' || c == ';' || c == ':' || c == '.');
    format!("{out}…")
}
