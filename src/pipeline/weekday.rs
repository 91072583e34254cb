//! Day-of-week aggregates.

use super::tables::DayOfWeekRow;
use super::tally::Tally;
use crate::parser::TransferRecord;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Label used for a weekday, e.g. `7 - Sunday`
pub fn weekday_label(day: Weekday) -> String {
    let name = match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    format!("{} - {}", day.number_from_monday(), name)
}

/// Group every in-window record by weekday (Monday = 1 … Sunday = 7)
///
/// Unfiltered by destination. When there is at least one record, every
/// weekday that occurs in `[start, end]` gets a row, zero-filled if needed.
pub fn calculate_day_of_week(
    records: &[TransferRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DayOfWeekRow> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut groups: BTreeMap<u32, (Weekday, Tally)> = BTreeMap::new();

    for day in start.iter_days().take_while(|d| *d <= end).take(7) {
        let weekday = day.weekday();
        groups.insert(weekday.number_from_monday(), (weekday, Tally::default()));
    }

    for record in records {
        let weekday = record.timestamp.weekday();
        groups
            .entry(weekday.number_from_monday())
            .or_insert_with(|| (weekday, Tally::default()))
            .1
            .add(record);
    }

    groups
        .into_iter()
        .map(|(day_index, (weekday, tally))| DayOfWeekRow {
            day_index,
            label: weekday_label(weekday),
            volume_native: tally.volume_native,
            transfers_count: tally.transfers_count(),
            senders_count: tally.senders_count(),
        })
        .collect()
}
