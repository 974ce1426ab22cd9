//! Slug repair: derive slugs for documents that have none.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{DocumentId, DocumentSummary, DocumentType, Slug};
use crate::error::Result;
use crate::port::outbound::cms::{ContentSource, ContentWriter};

/// A slug to assign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugFix {
    pub id: DocumentId,
    pub title: String,
    pub slug: Slug,
}

/// A document that cannot be repaired automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub id: DocumentId,
    pub title: Option<String>,
    pub reason: &'static str,
}

/// Planned changes for one document type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepairPlan {
    pub fixes: Vec<SlugFix>,
    pub skipped: Vec<Skipped>,
}

impl RepairPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty() && self.skipped.is_empty()
    }
}

/// Plan slugs for every document without one, unique against existing
/// slugs and against each other.
#[must_use]
pub fn plan(documents: &[DocumentSummary]) -> RepairPlan {
    let mut taken: HashSet<String> = documents
        .iter()
        .filter_map(|d| d.slug.as_deref().map(str::trim))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let mut plan = RepairPlan::default();
    for doc in documents {
        if doc.slug.as_deref().is_some_and(|s| !s.trim().is_empty()) {
            continue;
        }
        let title = doc.title.as_deref().map(str::trim).unwrap_or_default();
        let Some(base) = Slug::from_title(title) else {
            plan.skipped.push(Skipped {
                id: doc.id.clone(),
                title: doc.title.clone(),
                reason: "title has no characters usable in a slug",
            });
            continue;
        };
        let slug = base.unique_among(&taken);
        taken.insert(slug.as_str().to_string());
        plan.fixes.push(SlugFix {
            id: doc.id.clone(),
            title: title.to_string(),
            slug,
        });
    }
    plan
}

/// Outcome of applying a plan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepairOutcome {
    pub applied: Vec<SlugFix>,
    pub failed: Vec<(DocumentId, String)>,
}

/// Build the repair plan for a document type.
///
/// # Errors
/// Returns an error if the CMS cannot be read.
pub async fn plan_for(source: &dyn ContentSource, doc_type: DocumentType) -> Result<RepairPlan> {
    let documents = source.documents(doc_type).await?;
    let plan = plan(&documents);
    info!(
        doc_type = %doc_type,
        fixes = plan.fixes.len(),
        skipped = plan.skipped.len(),
        "Slug repair planned"
    );
    Ok(plan)
}

/// Write each planned slug. A failed patch is recorded and the rest continue.
pub async fn apply(writer: &dyn ContentWriter, plan: &RepairPlan) -> RepairOutcome {
    let mut outcome = RepairOutcome::default();
    for fix in &plan.fixes {
        match writer.set_slug(&fix.id, &fix.slug).await {
            Ok(()) => outcome.applied.push(fix.clone()),
            Err(e) => {
                warn!(id = %fix.id, slug = %fix.slug, error = %e, "Slug patch failed");
                outcome.failed.push((fix.id.clone(), e.to_string()));
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, title: Option<&str>, slug: Option<&str>) -> DocumentSummary {
        DocumentSummary {
            id: DocumentId::new(id),
            doc_type: DocumentType::Post,
            title: title.map(String::from),
            slug: slug.map(String::from),
        }
    }

    #[test]
    fn plans_unique_slugs() {
        let docs = [
            doc("a", Some("Trout Tips"), Some("trout-tips")),
            doc("b", Some("Trout Tips"), None),
            doc("c", Some("Trout  Tips!"), Some("")),
            doc("d", Some("Bass Basics"), None),
        ];
        let plan = plan(&docs);
        let slugs: Vec<(&str, &str)> = plan
            .fixes
            .iter()
            .map(|f| (f.id.as_str(), f.slug.as_str()))
            .collect();
        assert_eq!(
            slugs,
            [("b", "trout-tips-2"), ("c", "trout-tips-3"), ("d", "bass-basics")]
        );
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn untitled_documents_are_skipped() {
        let plan = plan(&[doc("a", None, None), doc("b", Some("???"), None)]);
        assert!(plan.fixes.is_empty());
        assert_eq!(plan.skipped.len(), 2);
    }

    #[test]
    fn documents_with_slugs_are_left_alone() {
        let plan = plan(&[doc("a", Some("Anything"), Some("Not Valid But Present"))]);
        assert!(plan.is_empty());
    }
}
