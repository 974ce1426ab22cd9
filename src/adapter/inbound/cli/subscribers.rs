//! Handlers for the `subscribers` command group.

use std::fs;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{
    ConfigPathArg, StatusFilter, SubscribersExportArgs, SubscribersListArgs,
};
use crate::adapter::inbound::cli::{config, output};
use crate::application::newsletter;
use crate::domain::subscriber::SubscriptionStatus;
use crate::error::Result;
use crate::infrastructure::bootstrap;

impl StatusFilter {
    const fn status(self) -> Option<SubscriptionStatus> {
        match self {
            Self::Active => Some(SubscriptionStatus::Active),
            Self::Unsubscribed => Some(SubscriptionStatus::Unsubscribed),
            Self::All => None,
        }
    }
}

#[derive(Tabled)]
struct SubscriberRow {
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Subscribed")]
    subscribed: String,
}

/// Execute `subscribers list`.
pub async fn execute_list(args: &SubscribersListArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let newsletter = bootstrap::build_newsletter(&config)?;
    let subscribers = newsletter.list(args.status.status()).await?;

    if output::is_json() {
        output::json_output("subscribers.list", &subscribers);
        return Ok(());
    }

    if subscribers.is_empty() {
        output::note("No subscribers");
        return Ok(());
    }

    let rows: Vec<SubscriberRow> = subscribers
        .iter()
        .map(|s| SubscriberRow {
            email: s.email.to_string(),
            name: s.name.clone().unwrap_or_default(),
            source: s.source.clone().unwrap_or_default(),
            status: s.status.to_string(),
            subscribed: s.subscribed_at.format("%Y-%m-%d").to_string(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::note(&format!("{} subscribers", subscribers.len()));
    Ok(())
}

/// Execute `subscribers count`.
pub async fn execute_count(args: &ConfigPathArg) -> Result<()> {
    let config = config::load(&args.config)?;
    let newsletter = bootstrap::build_newsletter(&config)?;
    let active = newsletter.count(SubscriptionStatus::Active).await?;
    let unsubscribed = newsletter.count(SubscriptionStatus::Unsubscribed).await?;

    if output::is_json() {
        output::json_output(
            "subscribers.count",
            &json!({ "active": active, "unsubscribed": unsubscribed }),
        );
        return Ok(());
    }

    output::section("Subscribers");
    output::field("Active", active);
    output::field("Unsubscribed", unsubscribed);
    Ok(())
}

/// Execute `subscribers export`.
pub async fn execute_export(args: &SubscribersExportArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let newsletter = bootstrap::build_newsletter(&config)?;
    let subscribers = newsletter.list(args.status.status()).await?;
    let csv = newsletter::to_csv(&subscribers);

    match &args.output {
        Some(path) => {
            fs::write(path, &csv)?;
            output::success(&format!("Exported {} subscribers", subscribers.len()));
            output::field("Path", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}
