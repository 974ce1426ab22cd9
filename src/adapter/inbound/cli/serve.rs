//! Handler for `serve`.

use tracing::info;

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::{config, output};
use crate::adapter::inbound::http;
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap;

/// Execute `serve`.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let mut config = config::load(&args.config)?;
    let logging = match output::verbosity() {
        0 => config.logging.clone(),
        1 => config.logging.clone().with_level("info"),
        _ => config.logging.clone().with_level("debug"),
    };
    logging.init();

    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    let addr = config
        .server
        .socket_addr()
        .map_err(|e| ConfigError::InvalidValue {
            field: "bind",
            reason: e.to_string(),
        })?;

    let state = bootstrap::build_app_state(&config)?;
    let app = http::router(state, &config.server.allowed_origins);

    output::section("Serving");
    output::field("Site", &config.site.base_url);
    output::field("Listen", format!("http://{addr}"));
    info!(
        project = %config.sanity.project_id,
        dataset = %config.sanity.dataset,
        "Starting HTTP server"
    );
    http::serve(addr, app).await
}
