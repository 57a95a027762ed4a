mod cli;
mod config;
mod engine;
mod error;
mod message;
mod publish;
mod replacement;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error(&format!("{err:#}"));
            if let Some(advice) = failure_hint(&err) {
                ui::hint(advice);
            }
            ExitCode::FAILURE
        }
    }
}

/// Operator advice for failures that came from the Grafana API.
fn failure_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<error::Error>()
        .and_then(error::Error::remote)
        .map(|remote| remote.category().advice())
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::from_cli(cli)?;

    let client = grafana::Client::new(&config.client_config())
        .map_err(|e| error::Error::Config(e.to_string()))?;

    if config.dry_run {
        let patch = publish::prepare(&client, &config).context("unable to process dashboard")?;
        let before = serde_json::to_string_pretty(&patch.before)?;
        let after = serde_json::to_string_pretty(&patch.dashboard.model)?;

        ui::info(&format!("Dry run for dashboard {}, nothing saved", config.uid));
        ui::diff(&before, &after);
        ui::kv("message", &patch.dashboard.message);
        return Ok(());
    }

    let response = publish::run(&client, &config).context("unable to process dashboard")?;

    ui::success("processed dashboard");
    ui::kv("uid", &response.uid);
    ui::kv("version", &response.version.to_string());
    if !response.url.is_empty() {
        ui::kv("url", &response.url);
    }
    Ok(())
}
