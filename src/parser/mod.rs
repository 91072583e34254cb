//! Event parsing and per-transfer derivations.
//!
//! This module handles:
//! - Extracting typed fields from the semi-structured event payload
//! - USD valuation, including the legacy fixed-price window
//! - Fee derivation from gas usage, token price and express fee

pub mod schema;
pub mod transfer;
pub mod valuation;

// Re-export main types
pub use schema::{Route, TransferRecord};
pub use transfer::{parse_event, parse_timestamp};
pub use valuation::{derive_fee, PricingRule};
