use std::io;
use std::process::ExitCode;

use anyhow::anyhow;
use chrono::Local;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::OffsetTime;
use whereis_client::{DateResolver, WhereisClient};
use whereis_config::Config;

mod cli;
mod command;
mod present;

use cli::Cli;

// --- Logging ---

fn init_logging(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let level = cli
        .log_level
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| config.log_level.clone());
    let filter = EnvFilter::new(level);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let installed = if cli.utc || config.utc {
        builder
            .with_timer(OffsetTime::new(
                time::UtcOffset::UTC,
                time::macros::format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
                ),
            ))
            .try_init()
    } else {
        builder.with_timer(LocalTimer).try_init()
    };
    installed.map_err(|e| anyhow!(e))
}

struct LocalTimer;

impl tracing_subscriber::fmt::time::FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

// --- Main ---

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load();
    init_logging(&cli, &config)?;
    debug!(api = %config.api_url, user_agent = %config.user_agent(), "configuration loaded");

    let client = WhereisClient::new(config.api_url.clone(), config.user_agent());
    let mut out = io::stdout().lock();
    let result = command::execute(
        &cli,
        &config,
        &DateResolver::new(),
        &client,
        io::stdout(),
        &mut out,
    )
    .await;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            Ok(ExitCode::from(e.exit_code() as u8))
        }
    }
}
