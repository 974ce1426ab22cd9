//! Handler for `social`.

use chrono::Utc;

use crate::adapter::inbound::cli::command::SocialArgs;
use crate::adapter::inbound::cli::{config, output};
use crate::application::social::pipeline::PipelineOutcome;
use crate::domain::carousel::Platform;
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Execute `social`.
pub async fn execute(args: &SocialArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let platform = Platform::from(args.platform);
    let pipeline = bootstrap::build_pipeline(&config, platform)?;

    let verb = if args.dry_run { "Rendering" } else { "Publishing" };
    let pb = output::spinner(&format!("{verb} {platform} carousel for {}", args.slug));
    let outcome = match pipeline.run(platform, &args.slug, args.dry_run, Utc::now()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            output::spinner_fail(&pb, "Carousel pipeline failed");
            return Err(e);
        }
    };
    output::spinner_success(&pb, "Carousel pipeline finished");

    if output::is_json() {
        output::json_output("social", &outcome);
        return Ok(());
    }

    match outcome {
        PipelineOutcome::DryRun(report) => {
            output::section("Dry run");
            output::field("Platform", report.platform);
            output::field("Post", &report.post_slug);
            if let Some(title) = &report.caption.title {
                output::field("Pin title", title);
            }
            output::section("Caption");
            output::lines(&report.caption.full_text());
            output::section("Slides");
            for file in &report.files {
                output::note(&file.display().to_string());
            }
            output::hint("re-run without --dry-run to upload and publish");
        }
        PipelineOutcome::Published(report) => {
            output::section("Published");
            output::field("Platform", report.platform);
            output::field("Post", &report.post_slug);
            output::field("Remote id", &report.remote_id);
            if let Some(permalink) = &report.permalink {
                output::field("Permalink", output::highlight(permalink));
            }
            output::field("Images", report.media_urls.len());
        }
    }
    Ok(())
}
