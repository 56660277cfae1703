//! Vacancy exporter CLI
//!
//! With no arguments, exports the previous day's vacancies to `vacancies.csv`.

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use vacancies::{
    error::Result,
    models::{Config, TimeWindow},
    pipeline,
    services::{HhClient, VacancyQuery},
};

/// Export the last day of hh.ru vacancies to CSV
#[derive(Parser, Debug)]
#[command(name = "vacancies", version, about = "hh.ru vacancy exporter")]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output CSV path (overrides configuration)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch vacancies and write the CSV file (default)
    Fetch,

    /// Print the hourly windows and query dates without fetching
    Windows,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            log::info!("Loaded configuration from {}", path.display());
            config
        }
        None => Config::default(),
    };
    if let Some(path) = cli.output {
        config.output.path = path;
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let now = Local::now().naive_local();

    match cli.command.unwrap_or(Command::Fetch) {
        Command::Fetch => {
            let client = HhClient::from_config(&config)?;
            let summary = pipeline::export_to_file(&config, &client, now).await?;

            log::info!(
                "Wrote {} vacancies from {} pages across {} windows to {} in {:.1}s",
                summary.row_count,
                summary.page_count,
                summary.window_count,
                summary
                    .output
                    .as_deref()
                    .unwrap_or(config.output.path.as_path())
                    .display(),
                summary.elapsed_secs()
            );
        }

        Command::Windows => {
            if let Some(actual) = pipeline::pinned_month_mismatch(&config.api.month, now) {
                log::warn!(
                    "Query dates are pinned to {} (queried day falls in {})",
                    config.api.month,
                    actual
                );
            }
            for window in TimeWindow::partition(now)? {
                let query = VacancyQuery::for_window(&window, &config.api);
                println!("{}\t{}\t{}", window, query.date_from, query.date_to);
            }
        }

        Command::Validate => {
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
