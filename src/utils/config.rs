//! Configuration and constants for the pipeline and CLI.

use chrono::NaiveDate;
use std::time::Duration;

/// Default timeout for warehouse statement requests
pub const DEFAULT_WAREHOUSE_TIMEOUT: Duration = Duration::from_secs(60);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Upstream event table holding one row per bridging event
pub const DEFAULT_EVENT_TABLE: &str = "axelar.axelscan.fact_gmp";

// Default query parameters (token integration date through the last tracked day)
pub const DEFAULT_START_DATE: NaiveDate = ymd(2024, 6, 10);
pub const DEFAULT_END_DATE: NaiveDate = ymd(2025, 7, 31);
pub const DEFAULT_TOKEN_SYMBOL: &str = "ATH";
pub const DEFAULT_EXCLUDED_CHAINS: &[&str] = &["Moonbeam"];

// Legacy pricing window: no recorded per-transfer valuation exists for these
// days, so USD value is rebuilt from the launch-day price.
pub const LEGACY_WINDOW_START: NaiveDate = ymd(2024, 6, 10);
pub const LEGACY_WINDOW_END: NaiveDate = ymd(2024, 6, 12);
pub const LEGACY_PRICE_USD: f64 = 0.084486;

/// Hard cap on rows in the recent transfers table
pub const MAX_RECENT_TRANSFERS: usize = 1000;

/// Separator used when rendering a route label
pub const ROUTE_SEPARATOR: &str = "→";

// Field paths inside the semi-structured `data` column
pub const SENDER_PATH: &[&str] = &["call", "transaction", "from"];
pub const RECEIVER_PATH: &[&str] = &["call", "returnValues", "destinationContractAddress"];
pub const AMOUNT_PATH: &[&str] = &["amount"];
pub const VALUE_PATH: &[&str] = &["value"];
pub const SYMBOL_PATH: &[&str] = &["symbol"];
pub const SOURCE_CHAIN_PATH: &[&str] = &["call", "chain"];
pub const DESTINATION_CHAIN_PATH: &[&str] = &["call", "returnValues", "destinationChain"];
pub const GAS_USED_PATH: &[&str] = &["gas", "gas_used_amount"];
pub const TOKEN_PRICE_PATH: &[&str] = &["gas_price_rate", "source_token", "token_price", "usd"];
pub const EXPRESS_FEE_PATH: &[&str] = &["fees", "express_fee_usd"];

/// Calendar date usable in a `const` item
///
/// **Private** - an invalid literal fails const evaluation, not a run
const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid date constant"),
    }
}
