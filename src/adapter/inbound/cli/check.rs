//! Handler for `check`: which integrations are configured and reachable.

use serde::Serialize;
use serde_json::json;

use crate::adapter::inbound::cli::command::ConfigPathArg;
use crate::adapter::inbound::cli::{config, output};
use crate::application::robots;
use crate::domain::carousel::Platform;
use crate::domain::DocumentType;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::cms::ContentSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "details", rename_all = "snake_case")]
enum Status {
    Ready,
    Missing(String),
    Warning(String),
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
struct Entry {
    name: &'static str,
    critical: bool,
    #[serde(flatten)]
    status: Status,
}

impl Entry {
    fn optional(name: &'static str, ready: bool, missing: &str) -> Self {
        Self {
            name,
            critical: false,
            status: if ready {
                Status::Ready
            } else {
                Status::Missing(missing.to_string())
            },
        }
    }

    fn is_healthy(&self) -> bool {
        !self.critical || matches!(self.status, Status::Ready)
    }
}

/// Warn when a disallow rule hides pages the sitemap advertises.
fn robots_policy(config: &Config) -> Entry {
    let blocked = robots::blocked_static_routes(&config.robots);
    Entry {
        name: "robots policy",
        critical: false,
        status: if blocked.is_empty() {
            Status::Ready
        } else {
            Status::Warning(format!("disallow rules hide {}", blocked.join(", ")))
        },
    }
}

/// Configuration-only checks; nothing here touches the network.
fn integrations(config: &Config) -> Vec<Entry> {
    let llm_var = config.llm.provider.api_key_var();
    let social = &config.social;
    vec![
        Entry::optional(
            "sanity write token",
            config.sanity.token.is_some(),
            "SANITY_API_TOKEN not set; slug repair is read-only",
        ),
        Entry::optional(
            "llm",
            bootstrap::build_llm(config).is_some(),
            &match llm_var {
                Some(var) => format!("{var} not set"),
                None => "provider disabled".to_string(),
            },
        ),
        Entry::optional(
            "applications webhook",
            config.forms.sheets_webhook_url.is_some(),
            "SHEETS_WEBHOOK_URL not set; /api/applications returns 503",
        ),
        Entry::optional(
            "newsletter mirror",
            config.forms.newsletter_webhook_url.is_some(),
            "NEWSLETTER_WEBHOOK_URL not set",
        ),
        Entry::optional(
            "unsplash",
            social.unsplash.access_key.is_some(),
            "UNSPLASH_ACCESS_KEY not set; slides use solid backgrounds",
        ),
        Entry::optional(
            "cloudinary",
            bootstrap::build_media_host(config).is_some(),
            "cloud_name, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET are all required",
        ),
        Entry::optional(
            "instagram",
            bootstrap::build_publisher(config, Platform::Instagram).is_some(),
            "account_id and INSTAGRAM_ACCESS_TOKEN are required",
        ),
        Entry::optional(
            "pinterest",
            bootstrap::build_publisher(config, Platform::Pinterest).is_some(),
            "board_id and PINTEREST_ACCESS_TOKEN are required",
        ),
    ]
}

/// Execute `check`.
pub async fn execute(args: &ConfigPathArg) -> Result<()> {
    let config = config::load(&args.config)?;
    let mut checks = Vec::new();

    let pb = output::spinner("Querying Sanity");
    let cms = bootstrap::build_cms(&config);
    let sanity = match cms.documents(DocumentType::Post).await {
        Ok(posts) => {
            output::spinner_success(&pb, &format!("Sanity answered with {} posts", posts.len()));
            Status::Ready
        }
        Err(e) => {
            output::spinner_fail(&pb, "Sanity query failed");
            Status::Failed(e.to_string())
        }
    };
    checks.push(Entry { name: "sanity", critical: true, status: sanity });

    let database = match bootstrap::build_subscriber_store(&config) {
        Ok(_) => Status::Ready,
        Err(e) => Status::Failed(e.to_string()),
    };
    checks.push(Entry { name: "database", critical: true, status: database });

    checks.extend(integrations(&config));
    checks.push(robots_policy(&config));
    let healthy = checks.iter().all(Entry::is_healthy);

    if output::is_json() {
        output::json_output(
            "check",
            &json!({
                "status": if healthy { "healthy" } else { "unhealthy" },
                "checks": checks,
            }),
        );
    } else {
        output::section("Integrations");
        for check in &checks {
            let suffix = if check.critical { " (critical)" } else { "" };
            let value = match &check.status {
                Status::Ready => "ready".to_string(),
                Status::Missing(why) => format!("off: {why}"),
                Status::Warning(why) => format!("warning: {why}"),
                Status::Failed(why) => format!("failed: {why}"),
            };
            output::field(&format!("{}{suffix}", check.name), value);
        }
    }

    if !healthy {
        output::error("Integration check failed");
        return Err(Error::Connection("integration check failed".to_string()));
    }
    output::success("Integration check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[test]
    fn bare_config_reports_everything_missing() {
        let config = testkit::config::config();
        let entries = integrations(&config);
        assert!(entries.iter().all(|e| !e.critical));
        assert!(entries
            .iter()
            .filter(|e| e.name != "llm")
            .all(|e| matches!(e.status, Status::Missing(_))));
        assert!(entries.iter().all(Entry::is_healthy));
    }

    #[test]
    fn critical_failure_is_unhealthy() {
        let entry = Entry {
            name: "sanity",
            critical: true,
            status: Status::Failed("timeout".into()),
        };
        assert!(!entry.is_healthy());
    }

    #[test]
    fn default_robots_policy_hides_nothing() {
        let config = testkit::config::config();
        assert_eq!(robots_policy(&config).status, Status::Ready);
    }

    #[test]
    fn robots_rule_over_public_pages_warns_without_failing() {
        let mut config = testkit::config::config();
        config.robots.disallow = vec!["/api/".into(), "/blog".into()];
        let entry = robots_policy(&config);
        assert_eq!(entry.status, Status::Warning("disallow rules hide /blog".into()));
        assert!(entry.is_healthy());
    }

    #[test]
    fn pinterest_ready_with_credentials() {
        let mut config = testkit::config::config();
        config.social.pinterest.board_id = Some("board".into());
        config.social.pinterest.access_token = Some("token".into());
        let entries = integrations(&config);
        let pinterest = entries.iter().find(|e| e.name == "pinterest").unwrap();
        assert_eq!(pinterest.status, Status::Ready);
    }
}
