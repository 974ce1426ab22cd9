//! Tip extraction for carousel slides.

use serde::Deserialize;
use tracing::debug;

use crate::application::extract;
use crate::domain::carousel::{Platform, Tip};
use crate::domain::seo::truncate_words;
use crate::domain::Post;
use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

/// Fewest tips the model is asked for.
pub const MIN_TIPS: usize = 3;
/// Most tips the model is asked for.
pub const MAX_TIPS: usize = 8;

const HEADING_MAX: usize = 60;
const TEXT_MAX: usize = 220;
const ARTICLE_MAX: usize = 6000;

const SYSTEM: &str = "You turn fishing articles into short, practical carousel tips. Reply with JSON only.";

#[derive(Debug, Deserialize)]
struct RawTip {
    #[serde(default)]
    heading: String,
    #[serde(default)]
    text: String,
}

fn prompt(post: &Post, count: usize) -> String {
    format!(
        r#"Extract {count} actionable tips from this article for a social media carousel.

Title: {title}

{body}

Each heading is at most {HEADING_MAX} characters and each text at most {TEXT_MAX} characters.

## Output (JSON only)
```json
[{{"heading": "Fish the shade", "text": "Bass hold under docks when the sun is high."}}]
```
"#,
        title = post.title,
        body = truncate_words(&post.body_text, ARTICLE_MAX),
    )
}

/// Parse tips from the model's reply, dropping blank entries and capping at
/// `budget`.
///
/// # Errors
/// Returns [`Error::Parse`] when no array is found, it is malformed, or no
/// usable tips remain.
pub fn parse(reply: &str, budget: usize) -> Result<Vec<Tip>> {
    let json = extract::json_array(reply)?;
    let raw: Vec<RawTip> =
        serde_json::from_str(json).map_err(|e| Error::Parse(format!("invalid tips JSON: {e}")))?;

    let tips: Vec<Tip> = raw
        .into_iter()
        .filter(|t| !t.heading.trim().is_empty() && !t.text.trim().is_empty())
        .map(|t| Tip {
            heading: truncate_words(&t.heading, HEADING_MAX),
            text: truncate_words(&t.text, TEXT_MAX),
        })
        .take(budget)
        .collect();

    if tips.is_empty() {
        return Err(Error::Parse("reply contained no tips".into()));
    }
    Ok(tips)
}

/// Ask the model for tips sized to the platform's slide budget.
///
/// # Errors
/// Returns the LLM's error or a parse error.
pub async fn extract(llm: &dyn Llm, platform: Platform, post: &Post) -> Result<Vec<Tip>> {
    let budget = platform.tip_budget();
    let count = budget.clamp(MIN_TIPS, MAX_TIPS);
    let reply = llm.complete(Some(SYSTEM), &prompt(post, count)).await?;
    let tips = parse(&reply, budget)?;
    debug!(platform = %platform, tips = tips.len(), "Tips extracted");
    Ok(tips)
}
