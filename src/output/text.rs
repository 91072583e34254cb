//! Plain-text rendering of a report.
//!
//! This is where presentation rounding happens: native amounts to whole
//! units, USD to 2 decimals, fees to 3 decimals. The report itself keeps
//! full precision.

use super::report::MetricsReport;
use std::fmt;

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Insert thousands separators into the integer part of a number
fn group_thousands(value: f64, places: usize) -> String {
    let formatted = format!("{:.*}", places, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Native amount in whole units, e.g. `1,235`
pub fn format_native(value: f64) -> String {
    group_thousands(round_to(value, 0), 0)
}

/// USD with 2 decimals, e.g. `$1,234.57`
pub fn format_usd(value: f64) -> String {
    format!("${}", group_thousands(round_to(value, 2), 2))
}

/// Fee with 3 decimals, or `-` when unknown
pub fn format_fee(value: Option<f64>) -> String {
    match value {
        Some(fee) => format!("${:.3}", round_to(fee, 3)),
        None => "-".to_string(),
    }
}

/// Large native volume in billions, e.g. `1.23 B ATH`
pub fn format_billions(value: f64, unit: &str) -> String {
    format!("{:.2} B {}", value / 1_000_000_000.0, unit)
}

fn format_optional_usd(value: Option<f64>) -> String {
    value.map(format_usd).unwrap_or_else(|| "-".to_string())
}

fn format_share(value: Option<f64>) -> String {
    value
        .map(|share| format!("{:.1}%", share * 100.0))
        .unwrap_or_else(|| "-".to_string())
}

/// Text summary of a report, rendered through `Display`
pub struct SummaryView<'a> {
    report: &'a MetricsReport,
    recent_rows: usize,
}

impl<'a> SummaryView<'a> {
    pub fn new(report: &'a MetricsReport, recent_rows: usize) -> Self {
        Self {
            report,
            recent_rows,
        }
    }
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let unit = &report.params.token_symbol;
        let tables = &report.tables;
        let rule = "=".repeat(80);

        writeln!(f, "{}", rule)?;
        writeln!(f, "{} INTERCHAIN TRANSFERS", unit)?;
        writeln!(
            f,
            "{} to {} by {}",
            report.params.start_date, report.params.end_date, report.params.granularity
        )?;
        writeln!(f, "{}", rule)?;

        let summary = &tables.summary;
        writeln!(
            f,
            "Volume:    {} ({} {})",
            format_billions(summary.volume_native, unit),
            format_native(summary.volume_native),
            unit
        )?;
        writeln!(f, "USD:       {}", format_usd(summary.volume_usd))?;
        writeln!(f, "Transfers: {}", summary.transfers_count)?;
        writeln!(f, "Senders:   {}", summary.senders_count)?;

        writeln!(f, "\nRoutes")?;
        for row in &tables.route_totals {
            writeln!(
                f,
                "  {:<28} {:>18} {:>18} {:>8} tx",
                row.route,
                format_native(row.volume_native),
                format_usd(row.volume_usd),
                row.transfers_count
            )?;
        }

        writeln!(f, "\nVolume by {}", report.params.granularity)?;
        for (row, share) in tables.time_series.iter().zip(&report.route_shares) {
            writeln!(
                f,
                "  {} {:<28} {:>18} {:>8} tx {:>7}",
                row.bucket,
                row.route,
                format_native(row.volume_native),
                row.transfers_count,
                format_share(share.share)
            )?;
        }

        writeln!(f, "\nTransfer sizes")?;
        for row in &tables.distribution_totals {
            writeln!(f, "  {:<22} {:>8}", row.label, row.transfers_count)?;
        }

        writeln!(f, "\nDay of week")?;
        for row in &tables.day_of_week {
            writeln!(
                f,
                "  {:<14} {:>18} {:>8} tx {:>8} senders",
                row.label,
                format_native(row.volume_native),
                row.transfers_count,
                row.senders_count
            )?;
        }

        writeln!(f, "\nFees")?;
        for row in &tables.fees {
            writeln!(
                f,
                "  {} {:<28} total {:>12} avg {:>10}",
                row.bucket,
                row.route,
                format_fee(row.total_fees),
                format_fee(row.average_fee)
            )?;
        }

        if self.recent_rows > 0 {
            writeln!(f, "\nRecent transfers")?;
            for row in tables.recent_transfers.iter().take(self.recent_rows) {
                writeln!(
                    f,
                    "  {} {:>14} {:>14} {}→{} {} fee {}",
                    row.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    format_native(row.amount_native),
                    format_optional_usd(row.amount_usd),
                    row.source_chain,
                    row.destination_chain,
                    row.transfer_id,
                    format_fee(row.fee_usd)
                )?;
            }
        }

        writeln!(f, "{}", rule)
    }
}

/// Render the report as a text summary
///
/// **Public** - used by `report --summary`
///
/// # Arguments
/// * `report` - Report to render
/// * `recent_rows` - How many recent transfers to list
pub fn render_summary(report: &MetricsReport, recent_rows: usize) -> String {
    SummaryView::new(report, recent_rows).to_string()
}
