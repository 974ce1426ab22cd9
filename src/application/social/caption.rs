//! Platform captions generated by the LLM and clamped to platform limits.

use serde::Deserialize;
use tracing::warn;

use crate::application::extract;
use crate::domain::carousel::{Caption, Platform};
use crate::domain::seo::truncate_words;
use crate::domain::Post;
use crate::error::Result;
use crate::port::outbound::llm::Llm;

const SYSTEM: &str = "You write social media copy for FishandTips, a fishing blog. \
Be concrete and enthusiastic, never clickbait. Reply with JSON only.";

#[derive(Debug, Deserialize)]
struct RawCaption {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    caption: String,
    #[serde(default)]
    hashtags: Vec<String>,
}

fn prompt(platform: Platform, post: &Post, link: &str) -> String {
    let summary = post
        .seo_description()
        .map_or_else(|| truncate_words(&post.body_text, 600), str::to_string);
    let rules = match platform {
        Platform::Instagram => format!(
            "Instagram carousel caption: at most {} characters, a hook in the first line, \
             end with \"Link in bio\". Suggest up to {} hashtags.",
            platform.caption_limit() - 200,
            platform.hashtag_limit()
        ),
        Platform::Pinterest => format!(
            "Pinterest pin: a keyword-rich title of at most {} characters and a description of \
             at most {} characters. Suggest up to 5 hashtags.",
            platform.title_limit().unwrap_or(100),
            platform.caption_limit() - 60,
        ),
    };
    format!(
        r#"Article: "{title}"
Summary: {summary}
URL: {link}

{rules}

## Output (JSON only)
```json
{{"title": "Pin title or null", "caption": "Caption text", "hashtags": ["fishing", "bassfishing"]}}
```
"#,
        title = post.title,
    )
}

/// Normalize hashtags: strip `#`, keep word characters, drop duplicates
/// (case-insensitive) and cap at the platform limit.
#[must_use]
pub fn normalize_hashtags(raw: &[String], platform: Platform) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.iter()
        .map(|t| {
            t.trim()
                .trim_start_matches('#')
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
        .take(platform.hashtag_limit())
        .collect()
}

/// Fit a caption to the platform: the pin title is word-truncated, and the
/// text is shortened so text plus hashtags stay within the caption limit.
/// Hashtags are dropped from the end if they alone would not fit.
#[must_use]
pub fn fit(platform: Platform, title: Option<String>, text: &str, hashtags: Vec<String>) -> Caption {
    let limit = platform.caption_limit();
    let title = match platform.title_limit() {
        Some(max) => title
            .map(|t| truncate_words(&t, max))
            .filter(|t| !t.is_empty()),
        None => None,
    };

    let mut hashtags = hashtags;
    let tags_len = |tags: &[String]| -> usize {
        if tags.is_empty() {
            0
        } else {
            // "\n\n" separator plus "#tag" joined by spaces.
            2 + tags.iter().map(|t| t.chars().count() + 1).sum::<usize>() + tags.len() - 1
        }
    };
    while !hashtags.is_empty() && tags_len(&hashtags) > limit / 2 {
        hashtags.pop();
    }

    let text = truncate_words(text, limit - tags_len(&hashtags));
    Caption {
        title,
        text,
        hashtags,
    }
}

/// Generate a caption for the post.
///
/// # Errors
/// Returns the LLM's error. A reply without usable JSON falls back to the
/// post's own description.
pub async fn generate(llm: &dyn Llm, platform: Platform, post: &Post, link: &str) -> Result<Caption> {
    let reply = llm.complete(Some(SYSTEM), &prompt(platform, post, link)).await?;

    let parsed = extract::json_object(&reply)
        .ok()
        .and_then(|json| serde_json::from_str::<RawCaption>(json).ok())
        .filter(|raw| !raw.caption.trim().is_empty());

    let caption = match parsed {
        Some(raw) => fit(
            platform,
            raw.title.or_else(|| Some(post.title.clone())),
            &raw.caption,
            normalize_hashtags(&raw.hashtags, platform),
        ),
        None => {
            warn!(platform = %platform, "Caption reply was not usable JSON; using post description");
            let text = post.seo_description().unwrap_or(post.title.as_str());
            fit(platform, Some(post.title.clone()), text, vec!["fishing".into()])
        }
    };
    Ok(caption)
}
