//! Handlers for `duplicates` and `keywords`.

use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{DuplicatesArgs, KeywordsArgs};
use crate::adapter::inbound::cli::{config, output};
use crate::application::duplicates::{self, DuplicateReport};
use crate::application::keywords;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::port::outbound::cms::ContentSource;

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Similarity")]
    similarity: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Slug")]
    slug: String,
}

/// Execute `duplicates`. Returns `Ok(false)` when the title looks like a
/// duplicate.
pub async fn execute_duplicates(args: &DuplicatesArgs) -> Result<bool> {
    let config = config::load(&args.config)?;
    let cms = bootstrap::build_cms(&config);

    let llm = if args.semantic {
        Some(bootstrap::build_llm(&config).ok_or(Error::Unavailable("LLM provider"))?)
    } else {
        None
    };

    let posts = cms.posts().await?;
    let candidates = duplicates::keyword_candidates(&args.title, &posts, args.threshold);

    let verdict = match &llm {
        Some(llm) => {
            let pb = output::spinner("Asking the model");
            match duplicates::semantic_check(llm.as_ref(), &args.title, &candidates, args.candidates).await {
                Ok(verdict) => {
                    output::spinner_success(&pb, "Model replied");
                    Some(verdict)
                }
                Err(e) => {
                    output::spinner_fail(&pb, "Semantic check failed");
                    return Err(e);
                }
            }
        }
        None => None,
    };

    let duplicate = verdict
        .as_ref()
        .map_or(!candidates.is_empty() && candidates[0].similarity >= 0.999, |v| v.duplicate);

    let report = DuplicateReport {
        title: args.title.clone(),
        candidates,
        verdict,
    };

    if output::is_json() {
        output::json_output("duplicates", &report);
        return Ok(!duplicate);
    }

    output::section("Proposed");
    output::field("Title", &report.title);
    output::field("Compared", format!("{} posts", posts.len()));

    if report.candidates.is_empty() {
        output::success("No similar titles found");
    } else {
        let rows: Vec<CandidateRow> = report
            .candidates
            .iter()
            .map(|c| CandidateRow {
                similarity: format!("{:.0}%", c.similarity * 100.0),
                title: c.title.clone(),
                slug: c.slug.clone().unwrap_or_else(|| "-".into()),
            })
            .collect();
        output::section("Similar titles");
        output::lines(&Table::new(rows).to_string());
    }

    if let Some(verdict) = &report.verdict {
        output::section("Verdict");
        if verdict.duplicate {
            let target = verdict.slug.as_deref().unwrap_or("an existing post");
            output::warning(&format!("Likely duplicate of {target}"));
        } else {
            output::success("Not a duplicate");
        }
        if !verdict.reason.is_empty() {
            output::note(&verdict.reason);
        }
    } else if !report.candidates.is_empty() {
        output::hint("add --semantic to have the model judge these");
    }

    Ok(!duplicate)
}

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "Total")]
    total: usize,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Hits")]
    hits: String,
}

/// Execute `keywords`.
pub async fn execute_keywords(args: &KeywordsArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let cms = bootstrap::build_cms(&config);
    let posts = cms.posts().await?;
    let matches = keywords::find_matches(&posts, &args.keywords);

    if output::is_json() {
        output::json_output("keywords", &matches);
        return Ok(());
    }

    if matches.is_empty() {
        output::warning(&format!("No posts mention {}", args.keywords.join(", ")));
        return Ok(());
    }

    let rows: Vec<MatchRow> = matches
        .iter()
        .map(|m| MatchRow {
            total: m.total,
            title: m.title.clone(),
            slug: m.slug.clone().unwrap_or_else(|| "-".into()),
            hits: m
                .hits
                .iter()
                .filter(|(_, n)| *n > 0)
                .map(|(k, n)| format!("{k}: {n}"))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::note(&format!("{} of {} posts match", matches.len(), posts.len()));
    Ok(())
}
