//! Report command implementation.
//!
//! The report command:
//! 1. Builds the event source
//! 2. Fetches and parses transfer records
//! 3. Computes every metrics table
//! 4. Writes the JSON report and optional text summary

use super::models::{ReportArgs, SourceSpec};
use crate::output::{render_summary, write_report, MetricsReport};
use crate::parser::PricingRule;
use crate::pipeline::{MetricsPipeline, PipelineConfig};
use crate::source::{FileSource, TransferSource, WarehouseClient};
use crate::utils::config::MAX_RECENT_TRANSFERS;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid parameters
/// * Warehouse or file source failures
/// * File write errors
pub fn execute_report(args: ReportArgs) -> Result<MetricsReport> {
    let start_time = Instant::now();

    info!(
        "Starting report for {} ({} to {})",
        args.params.token_symbol, args.params.start_date, args.params.end_date
    );

    info!("Step 1/3: Connecting to event source...");
    let source = build_source(&args.source).context("Failed to create event source")?;

    let pricing = PricingRule::default();
    let pipeline = MetricsPipeline::with_config(
        source,
        PipelineConfig {
            pricing,
            cache_enabled: args.cache_enabled,
        },
    );

    info!("Step 2/3: Computing metrics...");
    let tables = pipeline
        .run_all(&args.params)
        .context("Failed to compute metrics")?;

    debug!(
        "Tables: {} time series rows, {} routes, {} recent transfers",
        tables.time_series.len(),
        tables.route_totals.len(),
        tables.recent_transfers.len()
    );

    let report = MetricsReport::new(args.params.clone(), pricing, tables);

    info!("Step 3/3: Writing output...");
    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    if args.print_summary {
        println!("\n{}", render_summary(&report, args.recent_rows));
    }

    info!(
        "Report completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Build the boxed event source
///
/// **Private** - internal helper for execute_report
fn build_source(source: &SourceSpec) -> Result<Box<dyn TransferSource>> {
    match source {
        SourceSpec::File(path) => {
            info!("Event file: {}", path.display());
            Ok(Box::new(FileSource::new(path)))
        }
        SourceSpec::Warehouse { url, token, table } => {
            info!("Warehouse endpoint: {}", url);
            let mut client = WarehouseClient::new(url, token)?;
            if let Some(table) = table {
                client = client.with_table(table)?;
            }
            Ok(Box::new(client))
        }
    }
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    match &args.source {
        SourceSpec::File(path) => {
            if path.as_os_str().is_empty() {
                anyhow::bail!("Event file path cannot be empty");
            }
        }
        SourceSpec::Warehouse { url, token, .. } => {
            if url.is_empty() {
                anyhow::bail!("Warehouse URL cannot be empty");
            }

            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("Warehouse URL must start with http:// or https://");
            }

            if token.trim().is_empty() {
                anyhow::bail!("Warehouse token cannot be empty");
            }
        }
    }

    args.params.validate()?;

    if args.recent_rows > MAX_RECENT_TRANSFERS {
        anyhow::bail!("recent_rows is too large (max {})", MAX_RECENT_TRANSFERS);
    }

    Ok(())
}
