//! CLI integration tests. Everything here runs offline: commands that would
//! reach Sanity are only exercised up to their local validation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use chrono::Utc;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use fishandtips::adapter::outbound::sqlite::database::connection;
use fishandtips::adapter::outbound::sqlite::SqliteSubscriberStore;
use fishandtips::application::newsletter::{Newsletter, SubscribeRequest};

const SECRETS: &[&str] = &[
    "SANITY_API_TOKEN",
    "ANTHROPIC_API_KEY",
    "OPENAI_API_KEY",
    "SHEETS_WEBHOOK_URL",
    "NEWSLETTER_WEBHOOK_URL",
    "UNSPLASH_ACCESS_KEY",
    "CLOUDINARY_API_KEY",
    "CLOUDINARY_API_SECRET",
    "INSTAGRAM_ACCESS_TOKEN",
    "PINTEREST_ACCESS_TOKEN",
];

fn fishandtips() -> Command {
    let mut cmd = cargo_bin_cmd!("fishandtips");
    for var in SECRETS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn database(&self) -> String {
        self.path("subscribers.db").to_string_lossy().into_owned()
    }

    /// Write a config with the LLM disabled and the database in the
    /// workspace.
    fn config(&self, extra: &str) -> PathBuf {
        let path = self.path("config.toml");
        let toml = format!(
            "database = '{db}'\n\n\
             [site]\nbase_url = \"https://www.fishandtips.com\"\n\n\
             [sanity]\nproject_id = \"test1234\"\n\n\
             [llm]\nprovider = \"disabled\"\n\n\
             [robots]\ndisallow = [\"/api/\", \"/studio/\"]\n\
             {extra}",
            db = self.database(),
        );
        fs::write(&path, toml).expect("write config");
        path
    }
}

fn json_stdout(output: &[u8]) -> Value {
    let text = String::from_utf8_lossy(output);
    let line = text
        .lines()
        .rev()
        .find(|l| l.contains("\"command\""))
        .unwrap_or_else(|| panic!("no JSON result in stdout:\n{text}"));
    serde_json::from_str(line).expect("valid JSON")
}

#[test]
fn help_lists_commands() {
    fishandtips()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitemap"))
        .stdout(predicate::str::contains("feed"))
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("social"))
        .stdout(predicate::str::contains("subscribers"));
}

#[test]
fn version_names_the_binary() {
    fishandtips()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fishandtips"));
}

#[test]
fn unknown_command_is_a_usage_error() {
    fishandtips().arg("frobnicate").assert().failure();
}

#[test]
fn config_init_writes_template_once() {
    let ws = Workspace::new();
    let path = ws.path("nested/config.toml");

    fishandtips()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[sanity]"));

    fishandtips()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    fishandtips()
        .args(["config", "init", "--force"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn generated_template_validates() {
    let ws = Workspace::new();
    let path = ws.path("config.toml");
    fishandtips().args(["config", "init"]).arg(&path).assert().success();

    fishandtips()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file is valid"));
}

#[test]
fn validate_reports_missing_project() {
    let ws = Workspace::new();
    let path = ws.path("config.toml");
    fs::write(&path, "[site]\nname = \"FishandTips\"\n").unwrap();

    fishandtips()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("sanity.project_id"));
}

#[test]
fn validate_reports_toml_syntax_errors() {
    let ws = Workspace::new();
    let path = ws.path("config.toml");
    fs::write(&path, "[sanity\nproject_id = \"abc\"\n").unwrap();

    fishandtips()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn missing_config_file_fails_with_hint() {
    let ws = Workspace::new();
    fishandtips()
        .args(["robots", "--config"])
        .arg(ws.path("absent.toml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("config init"))
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn config_show_json() {
    let ws = Workspace::new();
    let path = ws.config("");
    let output = fishandtips()
        .args(["--json", "config", "show", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output.stdout);
    assert_eq!(json["command"], "config.show");
    assert_eq!(json["result"]["sanity"]["project_id"], "test1234");
    assert_eq!(json["result"]["llm"]["provider"], "disabled");
}

#[test]
fn robots_prints_policy_and_sitemap() {
    let ws = Workspace::new();
    let path = ws.config("");
    fishandtips()
        .args(["robots", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Disallow: /api/"))
        .stdout(predicate::str::contains("Disallow: /studio/"))
        .stdout(predicate::str::contains(
            "Sitemap: https://www.fishandtips.com/sitemap.xml",
        ));
}

#[test]
fn metadata_rejects_malformed_slug_before_querying() {
    let ws = Workspace::new();
    let path = ws.config("");
    fishandtips()
        .args(["metadata", "Bad Slug!", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid slug"));
}

#[test]
fn social_requires_an_llm() {
    let ws = Workspace::new();
    let path = ws.config("");
    fishandtips()
        .args(["social", "pinterest", "spring-bass-patterns", "--dry-run", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("LLM provider is not configured"));
}

#[test]
fn semantic_duplicates_require_an_llm() {
    let ws = Workspace::new();
    let path = ws.config("");
    fishandtips()
        .args(["duplicates", "Spring Bass Patterns", "--semantic", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("LLM provider is not configured"));
}

async fn seed(database: &str, emails: &[&str]) {
    let pool = connection::open(database).expect("open database");
    let newsletter = Newsletter::new(Arc::new(SqliteSubscriberStore::new(pool)), None);
    for email in emails {
        let request = SubscribeRequest {
            email: Some((*email).to_string()),
            source: Some("footer".into()),
            ..SubscribeRequest::default()
        };
        newsletter.subscribe(request, Utc::now()).await.expect("subscribe");
    }
}

#[tokio::test]
async fn subscribers_count_and_export() {
    let ws = Workspace::new();
    let path = ws.config("");
    seed(&ws.database(), &["riley@example.com", "sam@example.com"]).await;

    let output = fishandtips()
        .args(["--json", "subscribers", "count", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output.stdout);
    assert_eq!(json["result"]["active"], 2);
    assert_eq!(json["result"]["unsubscribed"], 0);

    let export = ws.path("subscribers.csv");
    fishandtips()
        .args(["subscribers", "export", "--config"])
        .arg(&path)
        .arg("--output")
        .arg(&export)
        .assert()
        .success();
    let csv = fs::read_to_string(&export).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("email,name,source,status,subscribed_at,unsubscribed_at")
    );
    assert!(csv.contains("riley@example.com,,footer,active,"));
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn subscribers_list_on_empty_database() {
    let ws = Workspace::new();
    let path = ws.config("");
    fishandtips()
        .args(["subscribers", "list", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No subscribers"));
    assert!(Path::new(&ws.database()).exists());
}
