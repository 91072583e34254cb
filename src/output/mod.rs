//! Output writers for metrics reports.
//!
//! This module handles:
//! - The versioned report document
//! - JSON reports on disk
//! - Text summaries with presentation rounding

pub mod json;
pub mod report;
pub mod text;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report};
pub use report::MetricsReport;
pub use text::{format_fee, format_native, format_usd, render_summary, round_to, SummaryView};
