use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Cli;
use crate::events::ProcessEvent;
use crate::pipeline;

fn init_logging() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

pub fn the_app() -> Result<ProcessEvent> {
    let cli = Cli::parse();
    init_logging();
    info!(input = %cli.input.display(), limit = cli.limit, "startup");

    let summary = pipeline::run(
        &cli.input,
        &cli.occupation_output,
        &cli.state_output,
        cli.limit,
    )?;

    if cli.json {
        let out = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
        println!("{out}");
    }

    match summary.failed() {
        0 => Ok(ProcessEvent::ProcessComplete),
        failed => Ok(ProcessEvent::ReportsFailed(failed)),
    }
}
