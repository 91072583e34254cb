//! Versioned report document written to disk.
//!
//! Schema is versioned to allow future evolution.

use crate::parser::PricingRule;
use crate::pipeline::{
    bucket_totals, class_shares, fee_totals, route_shares, BucketTotalRow, ClassShareRow,
    FeeTotalRow, MetricsTables, QueryParams, RouteShareRow,
};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Every table for one query plus the overlay series derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// RFC 3339 timestamp when the report was generated
    pub generated_at: String,

    pub params: QueryParams,
    pub pricing: PricingRule,

    #[serde(flatten)]
    pub tables: MetricsTables,

    pub bucket_totals: Vec<BucketTotalRow>,
    pub route_shares: Vec<RouteShareRow>,
    pub class_shares: Vec<ClassShareRow>,
    pub fee_totals: Vec<FeeTotalRow>,
}

impl MetricsReport {
    pub fn new(params: QueryParams, pricing: PricingRule, tables: MetricsTables) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            bucket_totals: bucket_totals(&tables.time_series),
            route_shares: route_shares(&tables.time_series),
            class_shares: class_shares(&tables.distribution_by_bucket),
            fee_totals: fee_totals(&tables.fees),
            params,
            pricing,
            tables,
        }
    }
}
