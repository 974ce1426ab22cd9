use std::process::ExitCode;

use clap::Parser;
use fishandtips::adapter::inbound::cli::command::{Cli, ColorChoice};
use fishandtips::adapter::inbound::cli::dispatch::execute;
use fishandtips::adapter::inbound::cli::output::{self, OutputConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
