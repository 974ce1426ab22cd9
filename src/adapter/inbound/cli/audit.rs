//! Handlers for the `audit` command group.
//!
//! Each handler returns `Ok(false)` when a failing finding was reported so
//! the binary can exit non-zero.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{AuditRedirectsArgs, AuditSlugsArgs, ConfigPathArg};
use crate::adapter::inbound::cli::{config, output};
use crate::application::audit::{redirect, seo, slug, Tally};
use crate::domain::seo::Severity;
use crate::domain::DocumentType;
use crate::error::Result;
use crate::infrastructure::bootstrap;

fn print_tally(tally: Tally) {
    output::section("Summary");
    output::field("Pass", tally.pass);
    output::field("Warn", tally.warn);
    output::field("Fail", tally.fail);
}

/// Execute `audit seo`.
pub async fn execute_seo(args: &ConfigPathArg) -> Result<bool> {
    let config = config::load(&args.config)?;
    let cms = bootstrap::build_cms(&config);

    let pb = output::spinner("Auditing posts");
    let report = seo::run(cms.as_ref()).await?;
    output::spinner_success(&pb, &format!("Audited {} posts", report.posts.len()));

    if output::is_json() {
        output::json_output(
            "audit.seo",
            &json!({ "summary": report.tally(), "posts": report.posts }),
        );
        return Ok(!report.has_failures());
    }

    let show_passing = output::verbosity() > 0;
    for post in &report.posts {
        if post.worst() == Severity::Pass && !show_passing {
            continue;
        }
        output::section(&post.title);
        if let Some(slug) = &post.slug {
            output::note(&format!("/blog/{slug}"));
        }
        for check in &post.checks {
            if check.severity == Severity::Pass && !show_passing {
                continue;
            }
            output::finding(check.severity, &check.field.to_string(), &check.message);
        }
    }

    print_tally(report.tally());
    Ok(!report.has_failures())
}

#[derive(Tabled)]
struct SlugRow {
    #[tabled(rename = "Type")]
    doc_type: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Problem")]
    problem: String,
}

/// Execute `audit slugs`.
pub async fn execute_slugs(args: &AuditSlugsArgs) -> Result<bool> {
    let config = config::load(&args.config)?;
    let cms = bootstrap::build_cms(&config);
    let types: Vec<DocumentType> = match args.doc_type {
        Some(kind) => vec![kind.into()],
        None => DocumentType::ALL.to_vec(),
    };

    let issues = slug::run(cms.as_ref(), &types).await?;

    if output::is_json() {
        output::json_output("audit.slugs", &json!({ "issues": issues }));
        return Ok(issues.is_empty());
    }

    if issues.is_empty() {
        output::success("Every document has a unique, valid slug");
        return Ok(true);
    }

    let rows: Vec<SlugRow> = issues
        .iter()
        .map(|issue| SlugRow {
            doc_type: issue.doc_type.to_string(),
            id: issue.id.to_string(),
            title: issue.title.clone().unwrap_or_else(|| "(untitled)".into()),
            slug: issue.slug.clone().unwrap_or_else(|| "-".into()),
            problem: issue.problem.to_string(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::warning(&format!("{} slug problems found", issues.len()));
    output::hint(&format!(
        "run {} to fill in missing slugs",
        output::highlight("fishandtips repair slugs --type <type>")
    ));
    Ok(false)
}

/// Execute `audit redirects`.
pub async fn execute_redirects(args: &AuditRedirectsArgs) -> Result<bool> {
    let config = config::load(&args.config)?;
    let cms = bootstrap::build_cms(&config);
    let report = redirect::run(&args.file, cms.as_ref()).await?;

    if output::is_json() {
        output::json_output(
            "audit.redirects",
            &json!({
                "checked": report.checked,
                "summary": report.tally(),
                "findings": report.findings,
            }),
        );
        return Ok(!report.has_failures());
    }

    output::section("Redirects");
    output::field("File", args.file.display());
    output::field("Rules", report.checked);

    if report.findings.is_empty() {
        output::success("No redirect problems found");
        return Ok(true);
    }

    for finding in &report.findings {
        let subject = format!("{} -> {}", finding.source, finding.destination);
        output::finding(finding.severity, &subject, &finding.problem.to_string());
    }
    print_tally(report.tally());
    Ok(!report.has_failures())
}
