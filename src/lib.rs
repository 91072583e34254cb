//! Interchain Metrics
//!
//! Cross-chain token transfer metrics over bridging events.
//!
//! Raw events are read from a warehouse (or a JSON export), turned into
//! typed transfer records with USD value and fee derived in the
//! application layer, and aggregated into the tables a dashboard renders:
//! summary, per-route time series and totals, transfer-size distribution,
//! recent transfers, day-of-week and fee aggregates.
//!
//! ## Getting Started
//!
//! ```bash
//! interchain-metrics report --input events.json --granularity week --summary
//! interchain-metrics --help
//! ```

pub mod commands;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod source;
pub mod utils;
