//! Aggregation of transfer records into the dashboard tables.
//!
//! This module transforms parsed transfer records into:
//! - Summary metrics and per-route time series and totals
//! - Transfer-size distribution by volume class
//! - Recent transfers, day-of-week and fee aggregates

pub mod cache;
pub mod distribution;
pub mod engine;
pub mod fees;
pub mod granularity;
pub mod params;
pub mod recent;
pub mod routes;
pub mod summary;
pub mod tables;
pub mod weekday;

mod tally;

// Re-export main types and functions
pub use cache::{Operation, ResultCache};
pub use distribution::{
    calculate_distribution_by_bucket, calculate_distribution_totals, class_shares, VolumeClass,
};
pub use engine::{MetricsPipeline, PipelineConfig};
pub use fees::{calculate_fee_aggregates, fee_totals};
pub use granularity::Granularity;
pub use params::QueryParams;
pub use recent::calculate_recent_transfers;
pub use routes::{bucket_totals, calculate_route_totals, calculate_time_series, route_shares};
pub use summary::calculate_summary;
pub use tables::*;
pub use weekday::{calculate_day_of_week, weekday_label};
