//! Result tables handed to the presentation layer.
//!
//! Values are unrounded; rounding is a display concern.

use super::distribution::VolumeClass;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Window-wide totals, unfiltered by destination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub volume_native: f64,
    pub volume_usd: f64,
    pub transfers_count: u64,
    pub senders_count: u64,
}

/// One (bucket, route) cell of the time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteBucketRow {
    pub bucket: NaiveDate,
    pub route: String,
    pub volume_native: f64,
    pub volume_usd: f64,
    pub transfers_count: u64,
    pub senders_count: u64,
}

/// Sum across routes within a bucket, for overlay lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketTotalRow {
    pub bucket: NaiveDate,
    pub volume_native: f64,
    pub volume_usd: f64,
    pub transfers_count: u64,
}

/// A route's fraction of its bucket's native volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteShareRow {
    pub bucket: NaiveDate,
    pub route: String,

    /// `None` when the bucket's total volume is zero
    pub share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTotalRow {
    pub route: String,
    pub volume_native: f64,
    pub volume_usd: f64,
    pub transfers_count: u64,
    pub senders_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBucketRow {
    pub bucket: NaiveDate,
    pub class: VolumeClass,

    /// Class label with the token unit, e.g. `1k<V<=10k ATH`
    pub label: String,
    pub transfers_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTotalRow {
    pub class: VolumeClass,
    pub label: String,
    pub transfers_count: u64,
}

/// A class's fraction of its bucket's transfer count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassShareRow {
    pub bucket: NaiveDate,
    pub class: VolumeClass,
    pub share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransferRow {
    pub timestamp: NaiveDateTime,
    pub amount_native: f64,
    pub amount_usd: Option<f64>,
    pub source_chain: String,
    pub destination_chain: String,
    pub sender_address: Option<String>,
    pub fee_usd: Option<f64>,
    pub transfer_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekRow {
    /// Monday = 1 … Sunday = 7
    pub day_index: u32,

    /// e.g. `1 - Monday`
    pub label: String,
    pub volume_native: f64,
    pub transfers_count: u64,
    pub senders_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBucketRow {
    pub bucket: NaiveDate,
    pub route: String,

    /// Sum of known fees, `None` when no fee in the group is known
    pub total_fees: Option<f64>,

    /// Mean over known fees only
    pub average_fee: Option<f64>,

    /// Transfers with a known fee
    pub priced_transfers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeTotalRow {
    pub bucket: NaiveDate,
    pub total_fees: Option<f64>,
}

/// Every table for one parameter tuple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsTables {
    pub summary: SummaryMetrics,
    pub time_series: Vec<RouteBucketRow>,
    pub route_totals: Vec<RouteTotalRow>,
    pub distribution_by_bucket: Vec<ClassBucketRow>,
    pub distribution_totals: Vec<ClassTotalRow>,
    pub recent_transfers: Vec<RecentTransferRow>,
    pub day_of_week: Vec<DayOfWeekRow>,
    pub fees: Vec<FeeBucketRow>,
}
