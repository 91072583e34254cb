//! Transfer-size distribution.
//!
//! A transfer's class comes from its same-day cumulative native amount:
//! rows are first summed per (day, transfer_id), then classified, then
//! counted as distinct transfer ids.

use super::granularity::Granularity;
use super::tables::{ClassBucketRow, ClassShareRow, ClassTotalRow};
use crate::parser::TransferRecord;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Size bucket over native amount; upper bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeClass {
    UpTo100,
    UpTo1k,
    UpTo10k,
    UpTo20k,
    UpTo50k,
    UpTo100k,
    Above100k,
}

impl VolumeClass {
    /// All classes, smallest first
    pub const ALL: [VolumeClass; 7] = [
        VolumeClass::UpTo100,
        VolumeClass::UpTo1k,
        VolumeClass::UpTo10k,
        VolumeClass::UpTo20k,
        VolumeClass::UpTo50k,
        VolumeClass::UpTo100k,
        VolumeClass::Above100k,
    ];

    /// Classify a cumulative native amount
    pub fn classify(amount: f64) -> Self {
        if amount <= 100.0 {
            VolumeClass::UpTo100
        } else if amount <= 1_000.0 {
            VolumeClass::UpTo1k
        } else if amount <= 10_000.0 {
            VolumeClass::UpTo10k
        } else if amount <= 20_000.0 {
            VolumeClass::UpTo20k
        } else if amount <= 50_000.0 {
            VolumeClass::UpTo50k
        } else if amount <= 100_000.0 {
            VolumeClass::UpTo100k
        } else {
            VolumeClass::Above100k
        }
    }

    /// Range notation without unit
    pub fn range(self) -> &'static str {
        match self {
            VolumeClass::UpTo100 => "V<=100",
            VolumeClass::UpTo1k => "100<V<=1k",
            VolumeClass::UpTo10k => "1k<V<=10k",
            VolumeClass::UpTo20k => "10k<V<=20k",
            VolumeClass::UpTo50k => "20k<V<=50k",
            VolumeClass::UpTo100k => "50k<V<=100k",
            VolumeClass::Above100k => "V>100k",
        }
    }

    /// Range notation followed by the token unit
    pub fn label(self, unit: &str) -> String {
        format!("{} {}", self.range(), unit)
    }
}

/// Class of every (day, transfer_id) pair
///
/// **Private** - shared by both distribution variants
fn classify_daily(records: &[TransferRecord]) -> Vec<(NaiveDate, &str, VolumeClass)> {
    let mut daily: HashMap<(NaiveDate, &str), f64> = HashMap::new();

    for record in records {
        *daily
            .entry((record.date(), record.transfer_id.as_str()))
            .or_insert(0.0) += record.amount_native;
    }

    debug!("Classifying {} (day, transfer) pairs", daily.len());

    daily
        .into_iter()
        .map(|((day, id), amount)| (day, id, VolumeClass::classify(amount)))
        .collect()
}

/// Distinct transfers per (bucket, class), ordered by bucket then class
pub fn calculate_distribution_by_bucket(
    records: &[TransferRecord],
    granularity: Granularity,
    unit: &str,
) -> Vec<ClassBucketRow> {
    let mut groups: BTreeMap<(NaiveDate, VolumeClass), HashSet<&str>> = BTreeMap::new();

    for (day, id, class) in classify_daily(records) {
        groups
            .entry((granularity.truncate(day), class))
            .or_default()
            .insert(id);
    }

    groups
        .into_iter()
        .map(|((bucket, class), ids)| ClassBucketRow {
            bucket,
            class,
            label: class.label(unit),
            transfers_count: ids.len() as u64,
        })
        .collect()
}

/// Distinct transfers per class over the whole window, in class order
pub fn calculate_distribution_totals(records: &[TransferRecord], unit: &str) -> Vec<ClassTotalRow> {
    let mut groups: BTreeMap<VolumeClass, HashSet<&str>> = BTreeMap::new();

    for (_, id, class) in classify_daily(records) {
        groups.entry(class).or_default().insert(id);
    }

    groups
        .into_iter()
        .map(|(class, ids)| ClassTotalRow {
            class,
            label: class.label(unit),
            transfers_count: ids.len() as u64,
        })
        .collect()
}

/// Each class's share of its bucket's transfer count
pub fn class_shares(rows: &[ClassBucketRow]) -> Vec<ClassShareRow> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.bucket).or_insert(0) += row.transfers_count;
    }

    rows.iter()
        .map(|row| {
            let total = totals.get(&row.bucket).copied().unwrap_or(0);
            ClassShareRow {
                bucket: row.bucket,
                class: row.class,
                share: (total > 0).then(|| row.transfers_count as f64 / total as f64),
            }
        })
        .collect()
}
