//! Route-based views: time series per route and window totals per route.

use super::granularity::Granularity;
use super::tables::{BucketTotalRow, RouteBucketRow, RouteShareRow, RouteTotalRow};
use super::tally::Tally;
use crate::parser::{Route, TransferRecord};
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// Records that belong in route views, paired with their route
///
/// Drops excluded destinations and records without a full route.
pub(crate) fn routed<'a>(
    records: &'a [TransferRecord],
    excluded: &'a [String],
) -> impl Iterator<Item = (Route, &'a TransferRecord)> + 'a {
    records
        .iter()
        .filter(move |record| !record.is_excluded(excluded))
        .filter_map(|record| record.route().map(|route| (route, record)))
}

/// Group by (bucket, route), ordered by bucket then route label
pub fn calculate_time_series(
    records: &[TransferRecord],
    granularity: Granularity,
    excluded: &[String],
) -> Vec<RouteBucketRow> {
    let mut groups: BTreeMap<(NaiveDate, String), Tally> = BTreeMap::new();

    for (route, record) in routed(records, excluded) {
        let bucket = granularity.truncate(record.date());
        groups.entry((bucket, route.label())).or_default().add(record);
    }

    debug!("Time series: {} (bucket, route) groups", groups.len());

    groups
        .into_iter()
        .map(|((bucket, route), tally)| RouteBucketRow {
            bucket,
            route,
            volume_native: tally.volume_native,
            volume_usd: tally.volume_usd,
            transfers_count: tally.transfers_count(),
            senders_count: tally.senders_count(),
        })
        .collect()
}

/// One total per route over the whole window
pub fn calculate_route_totals(records: &[TransferRecord], excluded: &[String]) -> Vec<RouteTotalRow> {
    let mut groups: BTreeMap<String, Tally> = BTreeMap::new();

    for (route, record) in routed(records, excluded) {
        groups.entry(route.label()).or_default().add(record);
    }

    groups
        .into_iter()
        .map(|(route, tally)| RouteTotalRow {
            route,
            volume_native: tally.volume_native,
            volume_usd: tally.volume_usd,
            transfers_count: tally.transfers_count(),
            senders_count: tally.senders_count(),
        })
        .collect()
}

/// Sum each bucket across routes
///
/// Transfer counts are summed per route, matching how the overlay line is
/// drawn from the time series rows.
pub fn bucket_totals(rows: &[RouteBucketRow]) -> Vec<BucketTotalRow> {
    let mut totals: BTreeMap<NaiveDate, BucketTotalRow> = BTreeMap::new();

    for row in rows {
        let total = totals.entry(row.bucket).or_insert_with(|| BucketTotalRow {
            bucket: row.bucket,
            volume_native: 0.0,
            volume_usd: 0.0,
            transfers_count: 0,
        });
        total.volume_native += row.volume_native;
        total.volume_usd += row.volume_usd;
        total.transfers_count += row.transfers_count;
    }

    totals.into_values().collect()
}

/// Each route's share of its bucket's native volume
pub fn route_shares(rows: &[RouteBucketRow]) -> Vec<RouteShareRow> {
    let totals: BTreeMap<NaiveDate, f64> = bucket_totals(rows)
        .into_iter()
        .map(|total| (total.bucket, total.volume_native))
        .collect();

    rows.iter()
        .map(|row| {
            let total = totals.get(&row.bucket).copied().unwrap_or(0.0);
            RouteShareRow {
                bucket: row.bucket,
                route: row.route.clone(),
                share: (total != 0.0).then(|| row.volume_native / total),
            }
        })
        .collect()
}
