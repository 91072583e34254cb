use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;

    if report.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported report version {} (expected {})",
            report.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Token: {}", report.params.token_symbol);
    println!(
        "  Window: {} to {} by {}",
        report.params.start_date, report.params.end_date, report.params.granularity
    );
    println!("  Transfers: {}", report.tables.summary.transfers_count);
    println!("  Routes: {}", report.tables.route_totals.len());
    println!("  Recent Rows: {}", report.tables.recent_transfers.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Interchain Metrics Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Report Structure:");
        println!("  version: string              - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string         - RFC 3339 timestamp");
        println!("  params: object               - start_date, end_date, granularity, token_symbol, excluded_chains");
        println!("  pricing: object              - Legacy pricing window and price");
        println!("  summary: object              - volume_native, volume_usd, transfers_count, senders_count");
        println!("  time_series: array           - Per (bucket, route) volumes and counts");
        println!("  route_totals: array          - Per route volumes and counts");
        println!("  distribution_by_bucket: array - Transfers per (bucket, volume class)");
        println!("  distribution_totals: array   - Transfers per volume class");
        println!("  recent_transfers: array      - Newest transfers (max 1000)");
        println!("  day_of_week: array           - Per weekday volume and counts (1 = Monday)");
        println!("  fees: array                  - Per (bucket, route) total and average fee");
        println!("  bucket_totals: array         - Per bucket sums across routes");
        println!("  route_shares: array          - Route share of bucket volume");
        println!("  class_shares: array          - Class share of bucket transfers");
        println!("  fee_totals: array            - Per bucket fee sums across routes");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Interchain Metrics v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Cross-chain token transfer metrics over bridging events.");
}
