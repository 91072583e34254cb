//! Typed transfer record derived from a raw bridging event.

use crate::utils::config::ROUTE_SEPARATOR;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One bridging event with its derived fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Event creation time, the basis for all bucketing
    pub timestamp: NaiveDateTime,

    /// Event-level identifier (not unique per token movement)
    pub transfer_id: String,

    pub sender_address: Option<String>,
    pub receiver_address: Option<String>,

    /// Quantity in the token's native unit
    pub amount_native: f64,

    /// USD value, `None` when it could not be priced
    pub amount_usd: Option<f64>,

    pub token_symbol: Option<String>,
    pub source_chain: Option<String>,
    pub destination_chain: Option<String>,

    /// Network fee in USD, `None` when unknown
    pub fee_usd: Option<f64>,
}

impl TransferRecord {
    /// Calendar date of the event
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Route of the transfer, if both chains are known
    pub fn route(&self) -> Option<Route> {
        match (&self.source_chain, &self.destination_chain) {
            (Some(source), Some(destination)) => Some(Route::new(source, destination)),
            _ => None,
        }
    }

    /// Whether the destination is one of `excluded` chains
    pub fn is_excluded(&self, excluded: &[String]) -> bool {
        self.destination_chain
            .as_ref()
            .is_some_and(|dest| excluded.iter().any(|chain| chain == dest))
    }
}

/// Ordered (source, destination) chain pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Route {
    pub source: String,
    pub destination: String,
}

impl Route {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Display label, e.g. `ethereum→arbitrum`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.source, ROUTE_SEPARATOR, self.destination)
    }
}
