use std::fs;

use fishandtips::error::{ConfigError, Error};
use fishandtips::infrastructure::config::llm::LlmProvider;
use fishandtips::infrastructure::config::settings::Config;
use fishandtips::testkit::config::MINIMAL_TOML;

const EXAMPLE: &str = include_str!("../config.example.toml");

fn invalid_field(result: fishandtips::error::Result<Config>) -> &'static str {
    match result {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
        Err(err) => panic!("expected an invalid value error, got {err}"),
        Ok(_) => panic!("expected an invalid value error, got a config"),
    }
}

#[test]
fn example_config_parses() {
    let config = Config::parse_toml(EXAMPLE).expect("example config is valid");
    assert!(config.site.base_url.starts_with("https://"));
    assert!(!config.sanity.project_id.is_empty());
}

#[test]
fn minimal_config_fills_defaults() {
    let config = Config::parse_toml(MINIMAL_TOML).unwrap();
    assert_eq!(config.site.name, "FishandTips");
    assert_eq!(config.site.language, "en-us");
    assert_eq!(config.sanity.dataset, "production");
    assert_eq!(config.sanity.api_version, "2024-01-01");
    assert_eq!(config.server.bind, "127.0.0.1:3000");
    assert_eq!(config.feed.max_items, 20);
    assert_eq!(config.robots.disallow, vec!["/api/", "/studio/"]);
    assert_eq!(config.llm.provider, LlmProvider::OpenAi);
    assert_eq!(config.database, "fishandtips.db");
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, MINIMAL_TOML).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.sanity.project_id, "test1234");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    match Config::load(dir.path().join("absent.toml")) {
        Err(Error::Config(ConfigError::ReadFile(_))) => {}
        Err(err) => panic!("expected a read error, got {err}"),
        Ok(_) => panic!("expected a read error"),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = Config::parse_toml("[site\nbase_url = 1");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn project_id_is_required() {
    let result = Config::parse_toml("[site]\nbase_url = \"https://www.fishandtips.com\"\n");
    match result {
        Err(Error::Config(ConfigError::MissingField { field })) => {
            assert_eq!(field, "sanity.project_id");
        }
        Err(err) => panic!("expected missing project id, got {err}"),
        Ok(_) => panic!("expected missing project id"),
    }
}

#[test]
fn relative_base_url_is_rejected() {
    let toml = MINIMAL_TOML.replace("https://www.fishandtips.com", "/blog");
    assert_eq!(invalid_field(Config::parse_toml(&toml)), "base_url");
}

#[test]
fn non_http_base_url_is_rejected() {
    let toml = MINIMAL_TOML.replace("https://www.fishandtips.com", "ftp://fishandtips.com");
    assert_eq!(invalid_field(Config::parse_toml(&toml)), "base_url");
}

#[test]
fn api_version_must_be_a_date() {
    let toml = format!("{MINIMAL_TOML}api_version = \"v2021-10-21\"\n");
    assert_eq!(invalid_field(Config::parse_toml(&toml)), "api_version");
}

#[test]
fn feed_needs_at_least_one_item() {
    let toml = format!("{MINIMAL_TOML}\n[feed]\nmax_items = 0\n");
    assert_eq!(invalid_field(Config::parse_toml(&toml)), "max_items");
}

#[test]
fn bind_must_be_a_socket_address() {
    let toml = format!("{MINIMAL_TOML}\n[server]\nbind = \"localhost\"\n");
    assert_eq!(invalid_field(Config::parse_toml(&toml)), "bind");
}

#[test]
fn render_timeout_must_be_positive() {
    let toml = format!("{MINIMAL_TOML}\n[social]\nrender_timeout_secs = 0\n");
    assert_eq!(invalid_field(Config::parse_toml(&toml)), "render_timeout_secs");
}

#[test]
fn llm_can_be_disabled() {
    let toml = format!("{MINIMAL_TOML}\n[llm]\nprovider = \"disabled\"\n");
    let config = Config::parse_toml(&toml).unwrap();
    assert_eq!(config.llm.provider, LlmProvider::Disabled);
}
