mod common;

use chrono::{Duration, NaiveDate};
use common::{date, event, EventBuilder};
use interchain_metrics::pipeline::{
    bucket_totals, class_shares, fee_totals, route_shares, Granularity, MetricsPipeline,
    PipelineConfig, QueryParams, VolumeClass,
};
use interchain_metrics::source::{EventQuery, MemorySource, RawEvent, TransferSource};
use interchain_metrics::utils::error::{ParamError, PipelineError, SourceError};
use pretty_assertions::assert_eq;
use std::cell::Cell;

/// Memory source that counts fetches
struct CountingSource {
    inner: MemorySource,
    calls: Cell<usize>,
}

impl CountingSource {
    fn new(events: Vec<RawEvent>) -> Self {
        Self {
            inner: MemorySource::new(events),
            calls: Cell::new(0),
        }
    }
}

impl TransferSource for CountingSource {
    fn fetch_events(&self, query: &EventQuery) -> Result<Vec<RawEvent>, SourceError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.fetch_events(query)
    }
}

struct FailingSource;

impl TransferSource for FailingSource {
    fn fetch_events(&self, _query: &EventQuery) -> Result<Vec<RawEvent>, SourceError> {
        Err(SourceError::InvalidResponse("connection reset".to_string()))
    }
}

fn june_params(granularity: Granularity) -> QueryParams {
    QueryParams::new(date(2024, 6, 10), date(2024, 6, 30), granularity, "ATH")
}

fn mixed_events() -> Vec<RawEvent> {
    vec![
        event("t1", "2024-06-11T09:00:00Z", 50.0)
            .sender("0xa")
            .route("ethereum", "arbitrum")
            .build(),
        event("t2", "2024-06-15T12:00:00Z", 150.0)
            .value(200.0)
            .sender("0xb")
            .route("ethereum", "arbitrum")
            .build(),
        event("t3", "2024-06-17T08:00:00Z", 2_000.0)
            .value(300.0)
            .sender("0xa")
            .route("base", "ethereum")
            .build(),
        event("t4", "2024-06-18T08:00:00Z", 500.0)
            .value(80.0)
            .sender("0xc")
            .route("ethereum", "Moonbeam")
            .build(),
        event("t5", "2024-06-20T08:00:00Z", 75.0)
            .value(10.0)
            .sender("0xd")
            .route("arbitrum", "base")
            .build(),
    ]
}

#[test]
fn test_legacy_window_summary() {
    let events = vec![
        event("t1", "2024-06-11T09:00:00Z", 50.0)
            .value(999.0)
            .sender("0xa")
            .build(),
        event("t2", "2024-06-15T12:00:00Z", 150.0)
            .value(200.0)
            .sender("0xb")
            .build(),
    ];
    let pipeline = MetricsPipeline::new(MemorySource::new(events));
    let params = june_params(Granularity::Month);

    let summary = pipeline.summary_metrics(&params).unwrap();
    assert_eq!(summary.volume_native, 200.0);
    assert_eq!(summary.transfers_count, 2);
    assert_eq!(summary.senders_count, 2);
    assert!((summary.volume_usd - (50.0 * 0.084486 + 200.0)).abs() < 1e-9);

    let classes = pipeline.distribution_totals(&params).unwrap();
    let labels: Vec<(&str, u64)> = classes
        .iter()
        .map(|row| (row.label.as_str(), row.transfers_count))
        .collect();
    assert_eq!(labels, vec![("V<=100 ATH", 1), ("100<V<=1k ATH", 1)]);
}

#[test]
fn test_token_filter_is_exact() {
    let events = vec![
        event("a", "2024-06-11T09:00:00Z", 10.0).build(),
        event("b", "2024-06-11T10:00:00Z", 20.0).symbol("ath").build(),
        event("c", "2024-06-11T11:00:00Z", 30.0).symbol("USDC").build(),
        event("d", "2024-06-11T12:00:00Z", 40.0).symbol("ATH ").build(),
    ];
    let pipeline = MetricsPipeline::new(MemorySource::new(events));
    let params = june_params(Granularity::Day);

    let tables = pipeline.run_all(&params).unwrap();
    assert_eq!(tables.summary.transfers_count, 1);
    assert_eq!(tables.summary.volume_native, 10.0);
    assert_eq!(tables.recent_transfers.len(), 1);
    assert_eq!(tables.recent_transfers[0].transfer_id, "a");
}

#[test]
fn test_records_outside_window_are_dropped() {
    let events = vec![
        event("before", "2024-06-09T23:59:59Z", 10.0).build(),
        event("first", "2024-06-10T00:00:00Z", 1.0).build(),
        event("last", "2024-06-30T23:59:59Z", 2.0).build(),
        event("after", "2024-07-01T00:00:00Z", 10.0).build(),
    ];
    let pipeline = MetricsPipeline::new(MemorySource::new(events));

    let summary = pipeline.summary_metrics(&june_params(Granularity::Day)).unwrap();
    assert_eq!(summary.transfers_count, 2);
    assert_eq!(summary.volume_native, 3.0);
}

#[test]
fn test_route_totals_match_summary_without_exclusion() {
    let pipeline = MetricsPipeline::new(MemorySource::new(mixed_events()));
    let params = june_params(Granularity::Week);

    let summary = pipeline.summary_metrics(&params).unwrap();
    let routes = pipeline.route_totals(&params).unwrap();

    let native: f64 = routes.iter().map(|r| r.volume_native).sum();
    let usd: f64 = routes.iter().map(|r| r.volume_usd).sum();
    assert!((native - summary.volume_native).abs() < 1e-9);
    assert!((usd - summary.volume_usd).abs() < 1e-9);
}

#[test]
fn test_excluded_destination_drops_out_of_route_views() {
    let pipeline = MetricsPipeline::new(MemorySource::new(mixed_events()));
    let params = june_params(Granularity::Week).with_excluded_chains(["Moonbeam"]);

    let tables = pipeline.run_all(&params).unwrap();

    let native: f64 = tables.route_totals.iter().map(|r| r.volume_native).sum();
    assert!(native <= tables.summary.volume_native);
    assert_eq!(tables.summary.volume_native - native, 500.0);

    assert!(tables.route_totals.iter().all(|r| !r.route.ends_with("Moonbeam")));
    assert!(tables.time_series.iter().all(|r| !r.route.ends_with("Moonbeam")));
    assert!(tables.fees.iter().all(|r| !r.route.ends_with("Moonbeam")));
    assert!(tables
        .recent_transfers
        .iter()
        .all(|r| r.destination_chain != "Moonbeam"));

    // Summary, distribution and weekday views keep excluded routes
    assert_eq!(tables.summary.transfers_count, 5);
    let classified: u64 = tables.distribution_totals.iter().map(|r| r.transfers_count).sum();
    assert_eq!(classified, 5);
}

#[test]
fn test_records_without_route_drop_out_of_route_views() {
    let mut unrouted = event("x", "2024-06-12T00:00:00Z", 5.0).build();
    unrouted.data["call"]["returnValues"]
        .as_object_mut()
        .unwrap()
        .remove("destinationChain");

    let pipeline = MetricsPipeline::new(MemorySource::new(vec![
        unrouted,
        event("y", "2024-06-12T01:00:00Z", 7.0).build(),
    ]));
    let params = june_params(Granularity::Day);

    let tables = pipeline.run_all(&params).unwrap();
    assert_eq!(tables.summary.transfers_count, 2);
    assert_eq!(tables.route_totals.len(), 1);
    assert_eq!(tables.route_totals[0].route, "ethereum→arbitrum");
    assert_eq!(tables.route_totals[0].volume_native, 7.0);
}

#[test]
fn test_time_series_buckets_and_route_labels() {
    let pipeline = MetricsPipeline::new(MemorySource::new(mixed_events()));
    let params = june_params(Granularity::Week);

    let rows = pipeline.time_series(&params).unwrap();
    let keys: Vec<(NaiveDate, &str)> = rows.iter().map(|r| (r.bucket, r.route.as_str())).collect();

    assert_eq!(
        keys,
        vec![
            (date(2024, 6, 10), "ethereum→arbitrum"),
            (date(2024, 6, 17), "arbitrum→base"),
            (date(2024, 6, 17), "base→ethereum"),
            (date(2024, 6, 17), "ethereum→Moonbeam"),
        ]
    );
    assert_eq!(rows[0].volume_native, 200.0);
    assert_eq!(rows[0].transfers_count, 2);
}

#[test]
fn test_route_shares_sum_to_one() {
    let pipeline = MetricsPipeline::new(MemorySource::new(mixed_events()));
    let rows = pipeline.time_series(&june_params(Granularity::Month)).unwrap();

    let shares = route_shares(&rows);
    let total: f64 = shares.iter().filter_map(|s| s.share).sum();
    assert!((total - 1.0).abs() < 1e-6);
}

/// Two day buckets with two routes each; the second day moves nothing
fn two_bucket_events() -> Vec<RawEvent> {
    vec![
        event("a1", "2024-06-12T01:00:00Z", 70.0)
            .route("ethereum", "arbitrum")
            .express_fee(10.0)
            .build(),
        event("b1", "2024-06-12T02:00:00Z", 30.0)
            .route("base", "ethereum")
            .express_fee(5.0)
            .build(),
        event("a2", "2024-06-13T01:00:00Z", 0.0)
            .route("ethereum", "arbitrum")
            .build(),
        event("b2", "2024-06-13T02:00:00Z", 0.0)
            .route("base", "ethereum")
            .build(),
    ]
}

#[test]
fn test_route_shares_per_bucket_and_zero_volume() {
    let pipeline = MetricsPipeline::new(MemorySource::new(two_bucket_events()));
    let rows = pipeline.time_series(&june_params(Granularity::Day)).unwrap();

    let shares: Vec<(NaiveDate, Option<f64>)> = route_shares(&rows)
        .into_iter()
        .map(|s| (s.bucket, s.share))
        .collect();
    assert_eq!(
        shares,
        vec![
            (date(2024, 6, 12), Some(0.3)),
            (date(2024, 6, 12), Some(0.7)),
            (date(2024, 6, 13), None),
            (date(2024, 6, 13), None),
        ]
    );

    let route_order: Vec<&str> = rows.iter().map(|r| r.route.as_str()).collect();
    assert_eq!(
        route_order,
        vec!["base→ethereum", "ethereum→arbitrum", "base→ethereum", "ethereum→arbitrum"]
    );

    let totals = bucket_totals(&rows);
    let volumes: Vec<(NaiveDate, f64, u64)> = totals
        .iter()
        .map(|t| (t.bucket, t.volume_native, t.transfers_count))
        .collect();
    assert_eq!(
        volumes,
        vec![(date(2024, 6, 12), 100.0, 2), (date(2024, 6, 13), 0.0, 2)]
    );
}

#[test]
fn test_fee_totals_sum_routes_and_keep_unknown() {
    let pipeline = MetricsPipeline::new(MemorySource::new(two_bucket_events()));
    let rows = pipeline.fee_aggregates(&june_params(Granularity::Day)).unwrap();

    let totals = fee_totals(&rows);
    let values: Vec<(NaiveDate, Option<f64>)> =
        totals.iter().map(|t| (t.bucket, t.total_fees)).collect();
    assert_eq!(
        values,
        vec![(date(2024, 6, 12), Some(15.0)), (date(2024, 6, 13), None)]
    );
}

#[test]
fn test_class_shares_within_bucket() {
    let events = vec![
        event("s1", "2024-06-14T01:00:00Z", 10.0).build(),
        event("s2", "2024-06-14T02:00:00Z", 50.0).build(),
        event("m1", "2024-06-14T03:00:00Z", 500.0).build(),
        event("m2", "2024-06-15T03:00:00Z", 600.0).build(),
    ];
    let pipeline = MetricsPipeline::new(MemorySource::new(events));
    let rows = pipeline
        .distribution_by_bucket(&june_params(Granularity::Day))
        .unwrap();

    let shares = class_shares(&rows);
    assert_eq!(shares.len(), 3);

    assert_eq!(shares[0].bucket, date(2024, 6, 14));
    assert_eq!(shares[0].class, VolumeClass::UpTo100);
    assert!((shares[0].share.unwrap() - 2.0 / 3.0).abs() < 1e-9);

    assert_eq!(shares[1].class, VolumeClass::UpTo1k);
    assert!((shares[1].share.unwrap() - 1.0 / 3.0).abs() < 1e-9);

    assert_eq!(shares[2].bucket, date(2024, 6, 15));
    assert_eq!(shares[2].share, Some(1.0));
}

#[test]
fn test_day_of_week_short_window_has_only_its_weekdays() {
    let pipeline = MetricsPipeline::new(MemorySource::new(vec![
        event("t1", "2024-06-11T09:00:00Z", 5.0).build(),
    ]));
    // 2024-06-10 through 2024-06-12 is Monday to Wednesday
    let params = QueryParams::new(date(2024, 6, 10), date(2024, 6, 12), Granularity::Day, "ATH");

    let rows = pipeline.day_of_week(&params).unwrap();
    let indices: Vec<u32> = rows.iter().map(|r| r.day_index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(rows[1].label, "2 - Tuesday");
    assert_eq!(rows[1].transfers_count, 1);
    assert_eq!(rows[0].transfers_count, 0);
    assert_eq!(rows[2].volume_native, 0.0);
}

#[test]
fn test_distribution_sums_per_day_and_transfer() {
    let events = vec![
        // Same transfer twice on one day: 60 + 60 lands in the second class
        event("split", "2024-06-13T01:00:00Z", 60.0).build(),
        event("split", "2024-06-13T02:00:00Z", 60.0).build(),
        event("edge", "2024-06-13T03:00:00Z", 100.0).build(),
        event("big", "2024-06-14T03:00:00Z", 100_000.5).build(),
    ];
    let pipeline = MetricsPipeline::new(MemorySource::new(events));
    let params = june_params(Granularity::Day);

    let totals = pipeline.distribution_totals(&params).unwrap();
    let classes: Vec<(VolumeClass, u64)> =
        totals.iter().map(|r| (r.class, r.transfers_count)).collect();
    assert_eq!(
        classes,
        vec![
            (VolumeClass::UpTo100, 1),
            (VolumeClass::UpTo1k, 1),
            (VolumeClass::Above100k, 1),
        ]
    );

    let by_day = pipeline.distribution_by_bucket(&params).unwrap();
    assert_eq!(by_day.len(), 3);
    assert_eq!(by_day[0].bucket, date(2024, 6, 13));
    assert_eq!(by_day[2].bucket, date(2024, 6, 14));
    assert_eq!(by_day[2].label, "V>100k ATH");
}

#[test]
fn test_day_of_week_has_every_weekday_in_order() {
    let pipeline = MetricsPipeline::new(MemorySource::new(mixed_events()));
    let rows = pipeline.day_of_week(&june_params(Granularity::Month)).unwrap();

    let indices: Vec<u32> = rows.iter().map(|r| r.day_index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(rows[0].label, "1 - Monday");

    // 2024-06-11 and 2024-06-18 are Tuesdays
    assert_eq!(rows[1].transfers_count, 2);
    assert_eq!(rows[1].volume_native, 550.0);
    // No Sunday traffic, but the row is still present
    assert_eq!(rows[6].transfers_count, 0);
    assert_eq!(rows[6].senders_count, 0);
}

#[test]
fn test_recent_transfers_capped_and_sorted() {
    let base = date(2024, 7, 1).and_hms_opt(0, 0, 0).unwrap();
    let events: Vec<RawEvent> = (0..1200)
        .map(|i| {
            let ts = base + Duration::minutes(i);
            EventBuilder::new(
                &format!("t{:04}", i),
                &ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            )
            .amount(1.0)
            .build()
        })
        .collect();

    let pipeline = MetricsPipeline::new(MemorySource::new(events));
    let params = QueryParams::new(date(2024, 7, 1), date(2024, 7, 31), Granularity::Day, "ATH");

    let rows = pipeline.recent_transfers(&params).unwrap();
    assert_eq!(rows.len(), 1000);
    assert_eq!(rows[0].transfer_id, "t1199");
    assert!(rows.windows(2).all(|pair| pair[0].timestamp >= pair[1].timestamp));
}

#[test]
fn test_recent_transfers_tie_break_on_id() {
    let events = vec![
        event("a", "2024-06-12T00:00:00Z", 1.0).build(),
        event("c", "2024-06-12T00:00:00Z", 1.0).build(),
        event("b", "2024-06-12T00:00:00Z", 1.0).build(),
    ];
    let pipeline = MetricsPipeline::new(MemorySource::new(events));

    let rows = pipeline.recent_transfers(&june_params(Granularity::Day)).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.transfer_id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b", "a"]);
}

#[test]
fn test_fee_average_skips_unknown_fees() {
    let events = vec![
        event("f1", "2024-06-20T00:00:00Z", 1.0).gas(1_000.0, 0.01).build(),
        event("f2", "2024-06-20T01:00:00Z", 1.0).build(),
        event("f3", "2024-06-20T02:00:00Z", 1.0).express_fee(20.0).build(),
    ];
    let pipeline = MetricsPipeline::new(MemorySource::new(events));

    let rows = pipeline.fee_aggregates(&june_params(Granularity::Month)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].priced_transfers, 2);
    assert!((rows[0].total_fees.unwrap() - 30.0).abs() < 1e-9);
    assert!((rows[0].average_fee.unwrap() - 15.0).abs() < 1e-9);
}

#[test]
fn test_empty_window_yields_empty_tables() {
    let pipeline = MetricsPipeline::new(MemorySource::default());
    let tables = pipeline.run_all(&june_params(Granularity::Month)).unwrap();

    assert_eq!(tables.summary.transfers_count, 0);
    assert_eq!(tables.summary.volume_native, 0.0);
    assert!(tables.time_series.is_empty());
    assert!(tables.route_totals.is_empty());
    assert!(tables.distribution_totals.is_empty());
    assert!(tables.recent_transfers.is_empty());
    assert!(tables.day_of_week.is_empty());
    assert!(tables.fees.is_empty());
}

#[test]
fn test_unparseable_events_are_skipped() {
    let mut no_id = event("gone", "2024-06-12T00:00:00Z", 5.0).build();
    no_id.id = None;
    let mut bad_time = event("bad", "2024-06-12T00:00:00Z", 5.0).build();
    bad_time.created_at = Some(serde_json::json!("yesterday"));

    let pipeline = MetricsPipeline::new(MemorySource::new(vec![
        no_id,
        bad_time,
        event("ok", "2024-06-12T00:00:00Z", 5.0).build(),
    ]));

    let summary = pipeline.summary_metrics(&june_params(Granularity::Day)).unwrap();
    assert_eq!(summary.transfers_count, 1);
}

#[test]
fn test_invalid_range_rejected_before_fetch() {
    let source = CountingSource::new(mixed_events());
    let pipeline = MetricsPipeline::new(&source);
    let params = QueryParams::new(date(2024, 7, 1), date(2024, 6, 1), Granularity::Day, "ATH");

    let err = pipeline.summary_metrics(&params).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::InvalidParams(ParamError::InvalidDateRange { .. })
    ));
    assert!(pipeline.run_all(&params).is_err());
    assert_eq!(source.calls.get(), 0);
}

#[test]
fn test_source_failure_is_reported() {
    let pipeline = MetricsPipeline::new(FailingSource);
    let err = pipeline
        .route_totals(&june_params(Granularity::Month))
        .unwrap_err();

    assert!(matches!(err, PipelineError::Source(_)));
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn test_cache_serves_repeated_queries() {
    let source = CountingSource::new(mixed_events());
    let pipeline = MetricsPipeline::new(&source);
    let params = june_params(Granularity::Week);

    let first = pipeline.route_totals(&params).unwrap();
    let second = pipeline.route_totals(&params).unwrap();
    assert_eq!(first, second);
    assert_eq!(source.calls.get(), 1);

    // A different parameter tuple is a different entry
    let monthly = june_params(Granularity::Month);
    pipeline.route_totals(&monthly).unwrap();
    assert_eq!(source.calls.get(), 2);

    // run_all fills every operation from one fetch
    pipeline.run_all(&monthly).unwrap();
    assert_eq!(source.calls.get(), 3);
    pipeline.fee_aggregates(&monthly).unwrap();
    pipeline.day_of_week(&monthly).unwrap();
    assert_eq!(source.calls.get(), 3);
}

#[test]
fn test_disabled_cache_always_fetches() {
    let source = CountingSource::new(mixed_events());
    let pipeline = MetricsPipeline::with_config(
        &source,
        PipelineConfig {
            cache_enabled: false,
            ..Default::default()
        },
    );
    let params = june_params(Granularity::Week);

    pipeline.summary_metrics(&params).unwrap();
    pipeline.summary_metrics(&params).unwrap();
    assert_eq!(source.calls.get(), 2);
    assert!(pipeline.cache().is_empty());
}
