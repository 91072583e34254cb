//! Metrics pipeline: fetch, parse, scope, then aggregate.
//!
//! Each operation validates its parameters, reads raw events from the
//! source, and computes one table. Operations share nothing but the
//! optional cache, so any of them can be called on its own.

use super::cache::{Cacheable, Operation, ResultCache};
use super::distribution::{calculate_distribution_by_bucket, calculate_distribution_totals};
use super::fees::calculate_fee_aggregates;
use super::params::QueryParams;
use super::recent::calculate_recent_transfers;
use super::routes::{calculate_route_totals, calculate_time_series};
use super::summary::calculate_summary;
use super::tables::{
    ClassBucketRow, ClassTotalRow, DayOfWeekRow, FeeBucketRow, MetricsTables, RecentTransferRow,
    RouteBucketRow, RouteTotalRow, SummaryMetrics,
};
use super::weekday::calculate_day_of_week;
use crate::parser::{parse_event, PricingRule, TransferRecord};
use crate::source::TransferSource;
use crate::utils::error::PipelineError;
use log::{debug, info, warn};
use std::time::Instant;

/// Pipeline settings that are not part of the query
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub pricing: PricingRule,
    pub cache_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pricing: PricingRule::default(),
            cache_enabled: true,
        }
    }
}

/// Metrics pipeline over an event source
pub struct MetricsPipeline<S> {
    source: S,
    pricing: PricingRule,
    cache: ResultCache,
}

impl<S: TransferSource> MetricsPipeline<S> {
    /// Pipeline with default pricing and caching enabled
    pub fn new(source: S) -> Self {
        Self::with_config(source, PipelineConfig::default())
    }

    pub fn with_config(source: S, config: PipelineConfig) -> Self {
        Self {
            source,
            pricing: config.pricing,
            cache: ResultCache::new(config.cache_enabled),
        }
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Fetch and parse every in-scope transfer record
    ///
    /// **Public** - the read path shared by all operations
    ///
    /// Events that fail to parse are skipped with a warning. The token and
    /// date filters are re-applied here so a source that over-returns
    /// cannot leak records into any table.
    pub fn load_records(&self, params: &QueryParams) -> Result<Vec<TransferRecord>, PipelineError> {
        params.validate()?;

        let events = self.source.fetch_events(&params.event_query())?;
        let fetched = events.len();

        let mut skipped = 0usize;
        let records: Vec<TransferRecord> = events
            .iter()
            .filter_map(|event| match parse_event(event, &self.pricing) {
                Ok(record) => Some(record),
                Err(e) => {
                    skipped += 1;
                    warn!("Skipping event {:?}: {}", event.id, e);
                    None
                }
            })
            .filter(|record| {
                record.token_symbol.as_deref() == Some(params.token_symbol.as_str())
                    && params.contains(record.date())
            })
            .collect();

        debug!(
            "Loaded {} records in scope ({} fetched, {} unparseable)",
            records.len(),
            fetched,
            skipped
        );

        Ok(records)
    }

    /// Operation 1: window-wide summary
    pub fn summary_metrics(&self, params: &QueryParams) -> Result<SummaryMetrics, PipelineError> {
        self.cached(Operation::Summary, params, calculate_summary)
    }

    /// Operation 2: per-bucket per-route time series
    pub fn time_series(&self, params: &QueryParams) -> Result<Vec<RouteBucketRow>, PipelineError> {
        self.cached(Operation::TimeSeries, params, |records| {
            calculate_time_series(records, params.granularity, &params.excluded_chains)
        })
    }

    /// Operation 3: per-route window totals
    pub fn route_totals(&self, params: &QueryParams) -> Result<Vec<RouteTotalRow>, PipelineError> {
        self.cached(Operation::RouteTotals, params, |records| {
            calculate_route_totals(records, &params.excluded_chains)
        })
    }

    /// Operation 4a: transfer-size classes per bucket
    pub fn distribution_by_bucket(
        &self,
        params: &QueryParams,
    ) -> Result<Vec<ClassBucketRow>, PipelineError> {
        self.cached(Operation::DistributionByBucket, params, |records| {
            calculate_distribution_by_bucket(records, params.granularity, &params.token_symbol)
        })
    }

    /// Operation 4b: transfer-size classes over the window
    pub fn distribution_totals(
        &self,
        params: &QueryParams,
    ) -> Result<Vec<ClassTotalRow>, PipelineError> {
        self.cached(Operation::DistributionTotals, params, |records| {
            calculate_distribution_totals(records, &params.token_symbol)
        })
    }

    /// Operation 5: newest transfers, capped
    pub fn recent_transfers(
        &self,
        params: &QueryParams,
    ) -> Result<Vec<RecentTransferRow>, PipelineError> {
        self.cached(Operation::RecentTransfers, params, |records| {
            calculate_recent_transfers(records, &params.excluded_chains)
        })
    }

    /// Operation 6: weekday aggregates
    pub fn day_of_week(&self, params: &QueryParams) -> Result<Vec<DayOfWeekRow>, PipelineError> {
        self.cached(Operation::DayOfWeek, params, |records| {
            calculate_day_of_week(records, params.start_date, params.end_date)
        })
    }

    /// Operation 7: fee sums and means per bucket and route
    pub fn fee_aggregates(&self, params: &QueryParams) -> Result<Vec<FeeBucketRow>, PipelineError> {
        self.cached(Operation::Fees, params, |records| {
            calculate_fee_aggregates(records, params.granularity, &params.excluded_chains)
        })
    }

    /// Compute every table from a single fetch
    ///
    /// The tables are one consistent snapshot; each is also stored in the
    /// cache under its own operation.
    pub fn run_all(&self, params: &QueryParams) -> Result<MetricsTables, PipelineError> {
        let start_time = Instant::now();
        info!(
            "Computing metrics for {} from {} to {} by {}",
            params.token_symbol, params.start_date, params.end_date, params.granularity
        );

        let records = self.load_records(params)?;
        info!("{} transfer records in scope", records.len());

        let tables = MetricsTables {
            summary: self.store(Operation::Summary, params, calculate_summary(&records)),
            time_series: self.store(
                Operation::TimeSeries,
                params,
                calculate_time_series(&records, params.granularity, &params.excluded_chains),
            ),
            route_totals: self.store(
                Operation::RouteTotals,
                params,
                calculate_route_totals(&records, &params.excluded_chains),
            ),
            distribution_by_bucket: self.store(
                Operation::DistributionByBucket,
                params,
                calculate_distribution_by_bucket(&records, params.granularity, &params.token_symbol),
            ),
            distribution_totals: self.store(
                Operation::DistributionTotals,
                params,
                calculate_distribution_totals(&records, &params.token_symbol),
            ),
            recent_transfers: self.store(
                Operation::RecentTransfers,
                params,
                calculate_recent_transfers(&records, &params.excluded_chains),
            ),
            day_of_week: self.store(
                Operation::DayOfWeek,
                params,
                calculate_day_of_week(&records, params.start_date, params.end_date),
            ),
            fees: self.store(
                Operation::Fees,
                params,
                calculate_fee_aggregates(&records, params.granularity, &params.excluded_chains),
            ),
        };

        info!(
            "Metrics computed in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(tables)
    }

    /// Return the cached table or load records and compute it
    ///
    /// **Private** - shared by the single-operation entry points
    fn cached<T, F>(
        &self,
        operation: Operation,
        params: &QueryParams,
        compute: F,
    ) -> Result<T, PipelineError>
    where
        T: Cacheable,
        F: FnOnce(&[TransferRecord]) -> T,
    {
        params.validate()?;

        if let Some(table) = self.cache.get(operation, params) {
            return Ok(table);
        }

        debug!("Computing {:?}", operation);
        let records = self.load_records(params)?;
        Ok(self.store(operation, params, compute(&records)))
    }

    fn store<T: Cacheable>(&self, operation: Operation, params: &QueryParams, table: T) -> T {
        self.cache.insert(operation, params, &table);
        table
    }
}
