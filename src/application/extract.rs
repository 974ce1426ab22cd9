//! Pull JSON out of free-form LLM replies.

use crate::error::{Error, Result};

/// Find a JSON value in `text`: the body of a fenced code block when present,
/// otherwise the span from the first `open` to the last `close`.
fn extract(text: &str, open: char, close: char) -> Result<&str> {
    let body = match text.find("```") {
        Some(fence) => {
            let after = &text[fence + 3..];
            // Skip a language tag such as `json`.
            let after = after.find('\n').map_or(after, |i| &after[i + 1..]);
            let end = after.find("```").unwrap_or(after.len());
            &after[..end]
        }
        None => text,
    };

    let start = body.find(open);
    let end = body.rfind(close);
    match (start, end) {
        (Some(start), Some(end)) if end > start => Ok(body[start..=end].trim()),
        _ => Err(Error::Parse("no JSON found in response".into())),
    }
}

/// Extract a JSON object.
///
/// # Errors
/// Returns [`Error::Parse`] when the reply contains no object.
pub fn json_object(text: &str) -> Result<&str> {
    extract(text, '{', '}')
}

/// Extract a JSON array.
///
/// # Errors
/// Returns [`Error::Parse`] when the reply contains no array.
pub fn json_array(text: &str) -> Result<&str> {
    extract(text, '[', ']')
}
