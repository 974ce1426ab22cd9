//! Handler for the `config` command group, plus config loading shared by
//! every other handler.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::diagnostic::ConfigDiagnostic;
use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::llm::LlmProvider;
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.example.toml");

/// Load and validate a configuration file.
///
/// TOML syntax errors are also rendered as a source-annotated diagnostic on
/// stderr before the error is returned.
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        output::hint(&format!(
            "run {} to create one",
            output::highlight(format!("fishandtips config init {}", path.display()))
        ));
        ConfigError::ReadFile(e)
    })?;

    match Config::parse_toml(&content) {
        Err(Error::Config(ConfigError::Parse(err))) => {
            if !output::is_json() {
                if let Some(diag) = ConfigDiagnostic::from_toml(path, content, &err) {
                    eprintln!("{:?}", miette::Report::new(diag));
                }
            }
            Err(ConfigError::Parse(err).into())
        }
        other => other,
    }
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your Sanity project", path.display()));
    output::note("2. Put API keys and webhook URLs in .env (see the template comments)");
    output::note(&format!("3. Run: fishandtips check -c {}", path.display()));
    output::note(&format!("4. Run: fishandtips serve -c {}", path.display()));
    Ok(())
}

fn configured(present: bool) -> &'static str {
    if present {
        "configured"
    } else {
        "not configured"
    }
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = load(path)?;

    if output::is_json() {
        output::json_output(
            "config.show",
            &json!({
                "site": {
                    "base_url": config.site.base_url,
                    "name": config.site.name,
                    "language": config.site.language,
                },
                "sanity": {
                    "project_id": config.sanity.project_id,
                    "dataset": config.sanity.dataset,
                    "api_version": config.sanity.api_version,
                    "use_cdn": config.sanity.use_cdn,
                    "token": config.sanity.token.is_some(),
                },
                "server": { "bind": config.server.bind, "allowed_origins": config.server.allowed_origins },
                "llm": { "provider": config.llm.provider.to_string() },
                "feed": { "max_items": config.feed.max_items },
                "robots": { "disallow": config.robots.disallow },
                "database": config.database,
                "social": { "work_dir": config.social.work_dir },
            }),
        );
        return Ok(());
    }

    output::section("Site");
    output::field("Base URL", &config.site.base_url);
    output::field("Name", &config.site.name);
    output::field("Language", &config.site.language);

    output::section("Sanity");
    output::field("Project", &config.sanity.project_id);
    output::field("Dataset", &config.sanity.dataset);
    output::field("API version", &config.sanity.api_version);
    output::field("CDN", config.sanity.use_cdn);
    output::field("Write token", configured(config.sanity.token.is_some()));

    output::section("Server");
    output::field("Bind", &config.server.bind);
    if config.server.allowed_origins.is_empty() {
        output::field("CORS", "any origin");
    } else {
        output::field("CORS", config.server.allowed_origins.join(", "));
    }

    output::section("Documents");
    output::field("Feed items", config.feed.max_items);
    output::field("Disallow", config.robots.disallow.join(" "));

    output::section("Integrations");
    output::field("LLM", config.llm.provider);
    output::field("Database", &config.database);
    output::field("Work dir", config.social.work_dir.display());

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = load(path)?;
    output::success("Config file is valid");

    let warnings = warnings(&config);
    if !warnings.is_empty() {
        output::section("Warnings");
        for warning in &warnings {
            output::warning(warning);
        }
    }

    output::field(
        "Next",
        format!("fishandtips config show -c {}", path.display()),
    );
    Ok(())
}

/// Settings that are valid but probably unintended.
fn warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.site.base_url.starts_with("http://") {
        warnings.push("site.base_url uses http; canonical URLs should be https".to_string());
    }
    if config.llm.provider == LlmProvider::Disabled {
        warnings.push("LLM disabled: chat falls back and the social pipeline cannot run".to_string());
    }
    if config.feed.max_items > 100 {
        warnings.push(format!(
            "feed.max_items = {} makes a very large feed",
            config.feed.max_items
        ));
    }
    warnings
}
