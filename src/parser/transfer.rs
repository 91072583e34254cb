//! Parser turning raw warehouse events into transfer records.
//!
//! Field access into the `data` payload is best-effort: a missing or
//! malformed optional field becomes `None`. Only a missing id or an
//! unreadable timestamp rejects the event.

use super::schema::TransferRecord;
use super::valuation::{derive_fee, PricingRule};
use crate::source::RawEvent;
use crate::utils::config::{
    AMOUNT_PATH, DESTINATION_CHAIN_PATH, EXPRESS_FEE_PATH, GAS_USED_PATH, RECEIVER_PATH,
    SENDER_PATH, SOURCE_CHAIN_PATH, SYMBOL_PATH, TOKEN_PRICE_PATH, VALUE_PATH,
};
use crate::utils::error::ParseError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde_json::Value;

/// Parse one raw event into a transfer record
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::MissingField` - no `id` or no `created_at`
/// * `ParseError::InvalidTimestamp` - `created_at` in an unknown format
pub fn parse_event(event: &RawEvent, pricing: &PricingRule) -> Result<TransferRecord, ParseError> {
    let transfer_id = event
        .id
        .clone()
        .ok_or(ParseError::MissingField("id"))?;

    let created_at = event
        .created_at
        .as_ref()
        .ok_or(ParseError::MissingField("created_at"))?;
    let timestamp = parse_timestamp(created_at)?;

    let data = &event.data;

    let raw_amount = lookup_f64(data, AMOUNT_PATH);
    if raw_amount.is_none() {
        debug!("Transfer {} has no numeric amount, counting it as 0", transfer_id);
    }

    let amount_usd = pricing.value_usd(timestamp.date(), raw_amount, lookup_f64(data, VALUE_PATH));

    let fee_usd = derive_fee(
        lookup_f64(data, GAS_USED_PATH),
        lookup_f64(data, TOKEN_PRICE_PATH),
        lookup_f64(data, EXPRESS_FEE_PATH),
    );

    Ok(TransferRecord {
        timestamp,
        transfer_id,
        sender_address: lookup_str(data, SENDER_PATH),
        receiver_address: lookup_str(data, RECEIVER_PATH),
        amount_native: raw_amount.unwrap_or(0.0),
        amount_usd,
        token_symbol: lookup_str(data, SYMBOL_PATH),
        source_chain: lookup_str(data, SOURCE_CHAIN_PATH),
        destination_chain: lookup_str(data, DESTINATION_CHAIN_PATH),
        fee_usd,
    })
}

/// Parse `created_at` in any of the formats the sources produce
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]` (space or `T`), a bare date,
/// and epoch seconds with an optional fraction (as text or a JSON number).
pub fn parse_timestamp(value: &Value) -> Result<NaiveDateTime, ParseError> {
    match value {
        Value::String(text) => parse_timestamp_str(text.trim()),
        Value::Number(number) => number
            .as_f64()
            .and_then(epoch_from_f64)
            .ok_or_else(|| ParseError::InvalidTimestamp(number.to_string())),
        other => Err(ParseError::InvalidTimestamp(other.to_string())),
    }
}

fn parse_timestamp_str(text: &str) -> Result<NaiveDateTime, ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    parse_epoch_str(text).ok_or_else(|| ParseError::InvalidTimestamp(text.to_string()))
}

/// Epoch seconds as text, keeping nanosecond precision
fn parse_epoch_str(text: &str) -> Option<NaiveDateTime> {
    let (secs, fraction) = match text.split_once('.') {
        Some((secs, fraction)) => (secs, fraction),
        None => (text, ""),
    };

    let negative = secs.starts_with('-');
    let secs: i64 = secs.parse().ok()?;

    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let digits: String = fraction.chars().take(9).collect();
    let nanos = if digits.is_empty() {
        0
    } else {
        format!("{:0<9}", digits).parse::<u32>().ok()?
    };

    // The fraction extends a negative value further back in time
    let (secs, nanos) = if negative && nanos > 0 {
        (secs.checked_sub(1)?, 1_000_000_000 - nanos)
    } else {
        (secs, nanos)
    };

    DateTime::from_timestamp(secs, nanos).map(|dt| dt.naive_utc())
}

fn epoch_from_f64(value: f64) -> Option<NaiveDateTime> {
    if !value.is_finite() {
        return None;
    }
    let secs = value.floor();
    let nanos = ((value - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos).map(|dt| dt.naive_utc())
}

/// Walk a key path into a JSON document
pub fn lookup<'a>(data: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(data, |current, key| current.get(*key))
}

/// Best-effort numeric cast: numbers and numeric strings, finite only
pub fn lookup_f64(data: &Value, path: &[&str]) -> Option<f64> {
    let value = match lookup(data, path)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    value.is_finite().then_some(value)
}

/// String field; numbers are rendered, everything else is `None`
pub fn lookup_str(data: &Value, path: &[&str]) -> Option<String> {
    match lookup(data, path)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
