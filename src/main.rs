//! Interchain Metrics CLI
//!
//! Computes cross-chain transfer metrics for a token and writes them as a
//! JSON report and an optional text summary.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use env_logger::Env;
use interchain_metrics::commands::{
    display_schema, display_version, execute_report, validate_args, validate_report_file,
    ReportArgs, SourceSpec,
};
use interchain_metrics::pipeline::{Granularity, QueryParams};
use interchain_metrics::utils::config::{
    DEFAULT_END_DATE, DEFAULT_START_DATE, DEFAULT_TOKEN_SYMBOL,
};
use std::path::PathBuf;

/// Interchain Metrics - cross-chain transfer analytics
#[derive(Parser, Debug)]
#[command(name = "interchain-metrics")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute every metrics table for a window
    Report {
        /// First day in scope (inclusive)
        #[arg(long, default_value_t = DEFAULT_START_DATE)]
        start: NaiveDate,

        /// Last day in scope (inclusive)
        #[arg(long, default_value_t = DEFAULT_END_DATE)]
        end: NaiveDate,

        /// Bucket width: day, week or month
        #[arg(short, long, default_value = "month")]
        granularity: Granularity,

        /// Token symbol (exact, case-sensitive)
        #[arg(long, default_value = DEFAULT_TOKEN_SYMBOL)]
        token: String,

        /// Destination chains dropped from route views (pass "" to keep all)
        #[arg(long = "exclude", default_value = "Moonbeam")]
        excluded_chains: Vec<String>,

        /// Read raw events from a JSON or JSON Lines file (takes precedence over the warehouse)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Warehouse statements endpoint base URL
        #[arg(long, env = "INTERCHAIN_WAREHOUSE_URL")]
        warehouse_url: Option<String>,

        /// Warehouse bearer token
        #[arg(long, env = "INTERCHAIN_WAREHOUSE_TOKEN", hide_env_values = true)]
        warehouse_token: Option<String>,

        /// Event table to query
        #[arg(long)]
        table: Option<String>,

        /// Output path for JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Recent transfers listed in the summary
        #[arg(long, default_value = "10")]
        recent: usize,

        /// Disable result caching
        #[arg(long)]
        no_cache: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Report {
            start,
            end,
            granularity,
            token,
            excluded_chains,
            input,
            warehouse_url,
            warehouse_token,
            table,
            output,
            summary,
            recent,
            no_cache,
        } => {
            let source = match (input, warehouse_url) {
                (Some(path), _) => SourceSpec::File(path),
                (None, Some(url)) => SourceSpec::Warehouse {
                    url,
                    token: warehouse_token.unwrap_or_default(),
                    table,
                },
                (None, None) => {
                    anyhow::bail!("Provide --input or --warehouse-url (or INTERCHAIN_WAREHOUSE_URL)")
                }
            };

            let params = QueryParams::new(start, end, granularity, token)
                .with_excluded_chains(excluded_chains.into_iter().filter(|c| !c.is_empty()));

            let args = ReportArgs {
                source,
                params,
                output_json: Some(output),
                print_summary: summary,
                recent_rows: recent,
                cache_enabled: !no_cache,
            };

            // Validate args first
            validate_args(&args)?;

            execute_report(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
