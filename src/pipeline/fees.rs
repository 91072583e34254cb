//! Fee aggregates per (bucket, route).

use super::granularity::Granularity;
use super::routes::routed;
use super::tables::{FeeBucketRow, FeeTotalRow};
use crate::parser::TransferRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Known fees of one group
#[derive(Debug, Default)]
struct FeeTally {
    sum: f64,
    known: u64,
}

impl FeeTally {
    fn add(&mut self, fee: Option<f64>) {
        if let Some(fee) = fee {
            self.sum += fee;
            self.known += 1;
        }
    }

    fn total(&self) -> Option<f64> {
        (self.known > 0).then_some(self.sum)
    }

    fn average(&self) -> Option<f64> {
        (self.known > 0).then(|| self.sum / self.known as f64)
    }
}

/// Sum and mean fee per (bucket, route); unknown fees are skipped
pub fn calculate_fee_aggregates(
    records: &[TransferRecord],
    granularity: Granularity,
    excluded: &[String],
) -> Vec<FeeBucketRow> {
    let mut groups: BTreeMap<(NaiveDate, String), FeeTally> = BTreeMap::new();

    for (route, record) in routed(records, excluded) {
        let bucket = granularity.truncate(record.date());
        groups
            .entry((bucket, route.label()))
            .or_default()
            .add(record.fee_usd);
    }

    groups
        .into_iter()
        .map(|((bucket, route), tally)| FeeBucketRow {
            bucket,
            route,
            total_fees: tally.total(),
            average_fee: tally.average(),
            priced_transfers: tally.known,
        })
        .collect()
}

/// Total fees per bucket across routes, for the overlay series
pub fn fee_totals(rows: &[FeeBucketRow]) -> Vec<FeeTotalRow> {
    let mut totals: BTreeMap<NaiveDate, Option<f64>> = BTreeMap::new();

    for row in rows {
        let total = totals.entry(row.bucket).or_insert(None);
        if let Some(fees) = row.total_fees {
            *total = Some(total.unwrap_or(0.0) + fees);
        }
    }

    totals
        .into_iter()
        .map(|(bucket, total_fees)| FeeTotalRow { bucket, total_fees })
        .collect()
}
