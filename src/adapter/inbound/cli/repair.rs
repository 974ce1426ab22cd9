//! Handler for `repair slugs`.

use serde_json::json;

use crate::adapter::inbound::cli::command::RepairSlugsArgs;
use crate::adapter::inbound::cli::{config, output};
use crate::application::repair;
use crate::domain::DocumentType;
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Execute `repair slugs`. Returns `Ok(false)` when any patch failed.
pub async fn execute_slugs(args: &RepairSlugsArgs) -> Result<bool> {
    let config = config::load(&args.config)?;
    let doc_type = DocumentType::from(args.doc_type);
    let cms = bootstrap::build_cms(&config);

    let plan = repair::plan_for(cms.as_ref(), doc_type).await?;

    if !args.apply {
        if output::is_json() {
            output::json_output("repair.slugs", &json!({ "applied": false, "plan": plan }));
            return Ok(true);
        }
        output::section(&format!("Slug plan for {doc_type}"));
        if plan.is_empty() {
            output::success("Nothing to repair");
            return Ok(true);
        }
        for fix in &plan.fixes {
            output::field(&fix.id.to_string(), format!("{} -> {}", fix.title, output::highlight(&fix.slug)));
        }
        for skipped in &plan.skipped {
            output::warning(&format!("{}: {}", skipped.id, skipped.reason));
        }
        output::hint("re-run with --apply to write these slugs");
        return Ok(true);
    }

    let pb = output::spinner(&format!("Writing {} slugs", plan.fixes.len()));
    let outcome = repair::apply(cms.as_ref(), &plan).await;
    if outcome.failed.is_empty() {
        output::spinner_success(&pb, &format!("Wrote {} slugs", outcome.applied.len()));
    } else {
        output::spinner_fail(&pb, &format!("{} patches failed", outcome.failed.len()));
    }

    if output::is_json() {
        output::json_output(
            "repair.slugs",
            &json!({ "applied": true, "outcome": outcome, "skipped": plan.skipped }),
        );
        return Ok(outcome.failed.is_empty());
    }

    for fix in &outcome.applied {
        output::success(&format!("{} -> {}", fix.title, fix.slug));
    }
    for (id, reason) in &outcome.failed {
        output::error(&format!("{id}: {reason}"));
    }
    for skipped in &plan.skipped {
        output::warning(&format!("skipped {}: {}", skipped.id, skipped.reason));
    }
    Ok(outcome.failed.is_empty())
}
