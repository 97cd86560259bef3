use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use pipestamp::error::FilterError;
use pipestamp::filter::{self, SystemClock};
use pipestamp::util::config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "pipestamp",
    version,
    about = "Rewrite ISO 8601 timestamps on stdin as \"time ago\" strings"
)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to file (the config file is only read then)
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The config only tunes debug logging; the filter itself never reads it.
    let guard = if cli.debug {
        let (config, config_error) = match AppConfig::load(cli.config.as_deref()) {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        };
        let guard = setup_logging(&config)?;
        if let Some(e) = config_error {
            warn!(error = %format!("{e:#}"), "Ignoring unusable config file");
        }
        Some(guard)
    } else {
        None
    };

    info!("pipestamp starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let exit_code = match filter::run(stdin.lock(), stdout.lock(), &SystemClock) {
        Ok(stats) => {
            info!(lines = stats.lines, "End of input");
            0
        }
        Err(FilterError::Read { source }) => {
            eprintln!("Error reading input: {source}");
            1
        }
        // Downstream went away (e.g. `| head`); nothing left to write to.
        Err(e @ FilterError::Write { .. }) => {
            debug!(error = %e, "Stopping on write failure");
            0
        }
    };

    // Flush the log writer before exiting.
    drop(guard);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn setup_logging(config: &AppConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "pipestamp.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(config.logging.filter.as_str())
        .with_ansi(false)
        .init();

    Ok(guard)
}
