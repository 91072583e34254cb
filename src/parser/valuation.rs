//! USD valuation and fee derivation for a single transfer.
//!
//! Both rules are null-safe: a value that cannot be derived becomes `None`
//! and drops out of sums, it never turns into zero or an error.

use crate::utils::config::{LEGACY_PRICE_USD, LEGACY_WINDOW_END, LEGACY_WINDOW_START};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pricing used for transfers that predate recorded valuations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    /// First day of the legacy window (inclusive)
    pub legacy_start: NaiveDate,

    /// Last day of the legacy window (inclusive)
    pub legacy_end: NaiveDate,

    /// Launch-day token price in USD
    pub legacy_price_usd: f64,
}

impl Default for PricingRule {
    fn default() -> Self {
        Self {
            legacy_start: LEGACY_WINDOW_START,
            legacy_end: LEGACY_WINDOW_END,
            legacy_price_usd: LEGACY_PRICE_USD,
        }
    }
}

impl PricingRule {
    pub fn in_legacy_window(&self, date: NaiveDate) -> bool {
        date >= self.legacy_start && date <= self.legacy_end
    }

    /// USD value of a transfer made on `date`
    ///
    /// Inside the legacy window the recorded value is ignored even when
    /// present; outside it the recorded value is used as-is.
    pub fn value_usd(
        &self,
        date: NaiveDate,
        amount_native: Option<f64>,
        recorded_value: Option<f64>,
    ) -> Option<f64> {
        if self.in_legacy_window(date) {
            amount_native.map(|amount| amount * self.legacy_price_usd)
        } else {
            recorded_value
        }
    }
}

/// Network fee in USD
///
/// Gas used times the source token price wins; the express fee is the
/// fallback; otherwise the fee is unknown.
pub fn derive_fee(
    gas_used: Option<f64>,
    token_price_usd: Option<f64>,
    express_fee_usd: Option<f64>,
) -> Option<f64> {
    match (gas_used, token_price_usd) {
        (Some(gas), Some(price)) => Some(gas * price),
        _ => express_fee_usd,
    }
}
