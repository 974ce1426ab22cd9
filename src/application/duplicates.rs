//! Duplicate-topic detection for proposed article titles.
//!
//! A cheap keyword pass ranks existing posts by Jaccard similarity of their
//! title tokens; an optional semantic pass asks the LLM to judge the top
//! candidates.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::extract;
use crate::domain::Post;
use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

/// Default minimum similarity for a keyword candidate.
pub const DEFAULT_THRESHOLD: f64 = 0.5;
/// Default number of candidates sent to the semantic check.
pub const DEFAULT_SEMANTIC_CANDIDATES: usize = 5;

const STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "best", "by", "can", "do", "for", "from",
    "guide", "how", "in", "into", "is", "it", "its", "of", "on", "or", "our", "that", "the",
    "their", "this", "tips", "to", "top", "vs", "what", "when", "where", "which", "why", "with",
    "you", "your",
];

/// Lowercased title tokens with stopwords removed.
#[must_use]
pub fn tokens(title: &str) -> HashSet<String> {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity of two token sets; two empty sets score 0.
#[must_use]
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let score = a.intersection(b).count() as f64 / union as f64;
    score
}

/// An existing post similar to the proposed title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub title: String,
    pub slug: Option<String>,
    pub similarity: f64,
}

/// Posts scoring at least `threshold`, most similar first.
#[must_use]
pub fn keyword_candidates(title: &str, posts: &[Post], threshold: f64) -> Vec<Candidate> {
    let proposed = tokens(title);
    let mut candidates: Vec<Candidate> = posts
        .iter()
        .map(|post| Candidate {
            title: post.title.clone(),
            slug: post.slug.as_ref().map(|s| s.as_str().to_string()),
            similarity: jaccard(&proposed, &tokens(&post.title)),
        })
        .filter(|c| c.similarity >= threshold)
        .collect();
    candidates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    candidates
}

/// The model's judgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub duplicate: bool,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub reason: String,
}

const SEMANTIC_SYSTEM: &str =
    "You are an editor for a fishing blog who prevents duplicate articles. Reply with JSON only.";

fn semantic_prompt(title: &str, candidates: &[Candidate]) -> String {
    let list = candidates
        .iter()
        .map(|c| format!("- \"{}\" (slug: {})", c.title, c.slug.as_deref().unwrap_or("none")))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"Proposed article title: "{title}"

Existing articles:
{list}

Does the proposed article cover substantially the same topic as one of the existing articles?

## Output (JSON only)
```json
{{"duplicate": true, "slug": "existing-slug-or-null", "reason": "Brief explanation"}}
```
"#
    )
}

/// Parse the model's reply.
///
/// # Errors
/// Returns [`Error::Parse`] when no valid verdict object is present.
pub fn parse_verdict(reply: &str) -> Result<Verdict> {
    let json = extract::json_object(reply)?;
    serde_json::from_str(json).map_err(|e| Error::Parse(format!("invalid verdict JSON: {e}")))
}

/// Ask the model about the top `limit` candidates. With no candidates the
/// title is unique and the model is not consulted.
///
/// # Errors
/// Returns the LLM's error or a parse error for an unusable reply.
pub async fn semantic_check(
    llm: &dyn Llm,
    title: &str,
    candidates: &[Candidate],
    limit: usize,
) -> Result<Verdict> {
    let top = &candidates[..candidates.len().min(limit)];
    if top.is_empty() {
        return Ok(Verdict {
            duplicate: false,
            slug: None,
            reason: "no similar titles".into(),
        });
    }
    let reply = llm.complete(Some(SEMANTIC_SYSTEM), &semantic_prompt(title, top)).await?;
    debug!(provider = llm.name(), "Semantic duplicate check complete");
    parse_verdict(&reply)
}

/// Full duplicate report.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    pub title: String,
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}
