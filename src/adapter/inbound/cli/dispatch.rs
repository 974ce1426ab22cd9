//! Command dispatch.

use std::process::ExitCode;

use super::command::{AuditCommand, Cli, Commands, ConfigCommand, RepairCommand, SubscribersCommand};
use super::{audit, check, config, document, editorial, repair, serve, social, subscribers};
use crate::error::Result;
use crate::infrastructure::config::logging::LoggingConfig;

/// Log level for one-shot commands: quiet unless `-v` is given.
fn command_logging(verbose: u8) -> LoggingConfig {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    LoggingConfig::default().with_level(level)
}

/// Run the parsed command line.
///
/// Reports and audits return [`ExitCode::FAILURE`] when they found a failing
/// problem; hard errors are returned as `Err`.
///
/// # Errors
/// Returns the handler's error.
pub async fn execute(cli: Cli) -> Result<ExitCode> {
    if !matches!(cli.command, Commands::Serve(_)) {
        command_logging(cli.verbose).init();
    }

    let passed = match &cli.command {
        Commands::Serve(args) => serve::execute(args).await.map(|()| true)?,
        Commands::Sitemap(args) => document::execute_sitemap(args).await.map(|()| true)?,
        Commands::Feed(args) => document::execute_feed(args).await.map(|()| true)?,
        Commands::Robots(args) => document::execute_robots(args).map(|()| true)?,
        Commands::Metadata(args) => document::execute_metadata(args).await.map(|()| true)?,
        Commands::Audit(AuditCommand::Seo(args)) => audit::execute_seo(args).await?,
        Commands::Audit(AuditCommand::Slugs(args)) => audit::execute_slugs(args).await?,
        Commands::Audit(AuditCommand::Redirects(args)) => audit::execute_redirects(args).await?,
        Commands::Repair(RepairCommand::Slugs(args)) => repair::execute_slugs(args).await?,
        Commands::Duplicates(args) => editorial::execute_duplicates(args).await?,
        Commands::Keywords(args) => editorial::execute_keywords(args).await.map(|()| true)?,
        Commands::Social(args) => social::execute(args).await.map(|()| true)?,
        Commands::Subscribers(SubscribersCommand::List(args)) => {
            subscribers::execute_list(args).await.map(|()| true)?
        }
        Commands::Subscribers(SubscribersCommand::Count(args)) => {
            subscribers::execute_count(args).await.map(|()| true)?
        }
        Commands::Subscribers(SubscribersCommand::Export(args)) => {
            subscribers::execute_export(args).await.map(|()| true)?
        }
        Commands::Config(ConfigCommand::Init(args)) => {
            config::execute_init(&args.path, args.force).map(|()| true)?
        }
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config).map(|()| true)?,
        Commands::Config(ConfigCommand::Validate(args)) => {
            config::execute_validate(&args.config).map(|()| true)?
        }
        Commands::Check(args) => check::execute(args).await.map(|()| true)?,
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
