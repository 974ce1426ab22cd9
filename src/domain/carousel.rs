//! Social carousel model: platforms, slides, captions and publish results.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Social platform a carousel is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Pinterest,
}

impl Platform {
    /// Platform name for logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Pinterest => "pinterest",
        }
    }

    /// Slide size in pixels (width, height).
    #[must_use]
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            // 4:5 portrait
            Self::Instagram => (1080, 1350),
            // 2:3 pin
            Self::Pinterest => (1000, 1500),
        }
    }

    /// Maximum number of images in one carousel post.
    #[must_use]
    pub const fn max_slides(self) -> usize {
        match self {
            Self::Instagram => 10,
            Self::Pinterest => 5,
        }
    }

    /// Minimum number of images for a carousel (single images publish as a
    /// plain post/pin).
    #[must_use]
    pub const fn min_carousel_slides(self) -> usize {
        2
    }

    /// Maximum caption/description length in characters.
    #[must_use]
    pub const fn caption_limit(self) -> usize {
        match self {
            Self::Instagram => 2200,
            Self::Pinterest => 500,
        }
    }

    /// Maximum hashtags accepted in a caption.
    #[must_use]
    pub const fn hashtag_limit(self) -> usize {
        match self {
            Self::Instagram => 30,
            Self::Pinterest => 20,
        }
    }

    /// Maximum title length (Pinterest only).
    #[must_use]
    pub const fn title_limit(self) -> Option<usize> {
        match self {
            Self::Instagram => None,
            Self::Pinterest => Some(100),
        }
    }

    /// Number of tip slides that fit between the cover and the
    /// call-to-action slide.
    #[must_use]
    pub const fn tip_budget(self) -> usize {
        self.max_slides() - 2
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A short tip extracted from an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub heading: String,
    pub text: String,
}

/// Role of a slide within the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    Cover,
    Tip,
    CallToAction,
}

/// One carousel slide before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub index: usize,
    pub kind: SlideKind,
    pub heading: String,
    pub body: String,
    /// Background photo URL; a solid background is used when absent.
    pub background: Option<String>,
}

/// Platform caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caption {
    /// Pin title (Pinterest only).
    pub title: Option<String>,
    pub text: String,
    pub hashtags: Vec<String>,
}

impl Caption {
    /// Caption body followed by its hashtags.
    #[must_use]
    pub fn full_text(&self) -> String {
        if self.hashtags.is_empty() {
            return self.text.clone();
        }
        let tags: Vec<String> = self.hashtags.iter().map(|t| format!("#{t}")).collect();
        format!("{}\n\n{}", self.text, tags.join(" "))
    }
}

/// Slides plus caption for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Carousel {
    pub platform: Platform,
    pub post_slug: String,
    pub link: String,
    pub slides: Vec<Slide>,
    pub caption: Caption,
}

impl Carousel {
    /// Build a carousel, checking the slide count against the platform.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SlideCount`] when there are fewer slides than
    /// a carousel needs or more than the platform accepts.
    pub fn new(
        platform: Platform,
        post_slug: impl Into<String>,
        link: impl Into<String>,
        slides: Vec<Slide>,
        caption: Caption,
    ) -> Result<Self, DomainError> {
        let min = platform.min_carousel_slides();
        if slides.len() < min || slides.len() > platform.max_slides() {
            return Err(DomainError::SlideCount {
                platform: platform.name(),
                min,
                max: platform.max_slides(),
                count: slides.len(),
            });
        }
        Ok(Self {
            platform,
            post_slug: post_slug.into(),
            link: link.into(),
            slides,
            caption,
        })
    }
}

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub platform: Platform,
    pub post_slug: String,
    pub media_urls: Vec<String>,
    pub remote_id: String,
    pub permalink: Option<String>,
}
