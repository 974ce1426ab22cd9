//! Slug audit: missing, invalid and duplicated slugs per document type.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{DocumentId, DocumentSummary, DocumentType, Slug};
use crate::error::Result;
use crate::port::outbound::cms::ContentSource;

/// What is wrong with a document's slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlugProblem {
    Missing,
    Invalid { reason: String },
    /// Shared with `count - 1` other documents of the same type.
    Duplicate { count: usize },
}

impl std::fmt::Display for SlugProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => f.write_str("missing slug"),
            Self::Invalid { reason } => write!(f, "invalid slug: {reason}"),
            Self::Duplicate { count } => write!(f, "slug used by {count} documents"),
        }
    }
}

/// One problem on one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugIssue {
    pub doc_type: DocumentType,
    pub id: DocumentId,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub problem: SlugProblem,
}

/// Find slug problems among documents of a single type.
#[must_use]
pub fn find_issues(documents: &[DocumentSummary]) -> Vec<SlugIssue> {
    let mut issues = Vec::new();
    let mut by_slug: HashMap<&str, usize> = HashMap::new();

    for doc in documents {
        match doc.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => issues.push(issue(doc, SlugProblem::Missing)),
            Some(raw) => {
                if let Err(e) = Slug::parse(raw) {
                    issues.push(issue(
                        doc,
                        SlugProblem::Invalid {
                            reason: e.to_string(),
                        },
                    ));
                }
                *by_slug.entry(raw).or_default() += 1;
            }
        }
    }

    for doc in documents {
        let Some(raw) = doc.slug.as_deref().map(str::trim) else {
            continue;
        };
        if let Some(&count) = by_slug.get(raw) {
            if count > 1 {
                issues.push(issue(doc, SlugProblem::Duplicate { count }));
            }
        }
    }

    issues
}

fn issue(doc: &DocumentSummary, problem: SlugProblem) -> SlugIssue {
    SlugIssue {
        doc_type: doc.doc_type,
        id: doc.id.clone(),
        title: doc.title.clone(),
        slug: doc.slug.clone(),
        problem,
    }
}

/// Audit every listed document type.
///
/// # Errors
/// Returns an error if the CMS cannot be read.
pub async fn run(source: &dyn ContentSource, types: &[DocumentType]) -> Result<Vec<SlugIssue>> {
    let mut issues = Vec::new();
    for &doc_type in types {
        let documents = source.documents(doc_type).await?;
        issues.extend(find_issues(&documents));
    }
    Ok(issues)
}
