//! linkhound CLI
//!
//! Sweeps the configured search engines and writes a categorized report.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use linkhound::{
    error::{AppError, Result},
    fetch::{HttpFetcher, PageCache},
    models::Config,
    pipeline,
    services::{Classifier, ReportRenderer},
};

/// linkhound - Search Engine Link Sweeper
#[derive(Parser, Debug)]
#[command(
    name = "linkhound",
    version,
    about = "Sweeps search engines for links and files them into categories"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "linkhound.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep all engines and write the report
    Run {
        /// Output directory (default: report.output_dir from config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the report instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Filter a newline-separated list of raw URLs without crawling
    Classify {
        /// File with one raw URL per line
        #[arg(short, long)]
        input: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,

    /// Delete the response cache
    ClearCache,
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

    let config = Config::load_or_default(&cli.config)?;
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Run { output_dir, stdout } => {
            let fetcher = Arc::new(HttpFetcher::new(&config.crawler)?);
            let report = pipeline::run_sweep(&config, fetcher).await?;

            if stdout {
                println!("{}", report.rendered);
            } else {
                let dir = output_dir.unwrap_or_else(|| config.report.output_dir.clone());
                let renderer = ReportRenderer::new(config.report.format);
                let (report_path, queries_path) =
                    pipeline::save_report(&report, &renderer, &dir).await?;
                log::info!("Report saved to {}", report_path.display());
                log::info!("Query summary saved to {}", queries_path.display());
            }

            log::info!(
                "Sweep complete: {} URLs across {} categories",
                report.categories.iter().map(|c| c.urls.len()).sum::<usize>(),
                report.categories.len()
            );
        }

        Command::Classify { input, output } => {
            config.validate()?;
            let content = std::fs::read_to_string(&input)?;
            let raw: Vec<&str> = content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect();
            log::info!("Read {} raw URLs from {}", raw.len(), input.display());

            let classifier =
                Classifier::with_signature(config.category_rules()?, config.signature()?);
            let renderer = ReportRenderer::new(config.report.format);
            let outcome = pipeline::run_filter(&raw, &classifier, &renderer)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &outcome.rendered)?;
                    log::info!("Report saved to {}", path.display());
                }
                None => println!("{}", outcome.rendered),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            let rules = config.category_rules()?;
            log::info!(
                "✓ Config OK ({} queries, {} allow rules, {} deny rules)",
                config.queries.len(),
                rules.iter().filter(|r| r.allowed).count(),
                rules.iter().filter(|r| !r.allowed).count()
            );
        }

        Command::ClearCache => {
            let Some(dir) = &config.crawler.cache_dir else {
                return Err(AppError::config("crawler.cache_dir is not set"));
            };
            if PageCache::new(dir, None).clear().await? {
                log::info!("Removed cache at {}", dir.display());
            } else {
                log::info!("No cache found at {}", dir.display());
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
