//! Types for reading bridging events from the warehouse.
//!
//! The request/response shapes follow the SQL-over-HTTP statements API:
//! a statement with positional `?` placeholders plus a map of typed bindings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the upstream event table, before any derivation
///
/// `created_at` stays a raw JSON value because the warehouse returns epoch
/// seconds as text while exports usually carry ISO-8601 strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub created_at: Option<serde_json::Value>,

    #[serde(default)]
    pub id: Option<String>,

    /// Semi-structured event payload
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Filter pushed down to the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub token_symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A typed bind variable
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Binding {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Binding {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: "TEXT".to_string(),
            value: value.into(),
        }
    }
}

/// Statement submission body
#[derive(Debug, Clone, Serialize)]
pub struct StatementRequest {
    pub statement: String,

    /// Server-side timeout in seconds
    pub timeout: u64,

    /// Bindings keyed by 1-based placeholder position
    pub bindings: BTreeMap<String, Binding>,
}

/// Statement response (first partition inline, others fetched by handle)
#[derive(Debug, Deserialize)]
pub struct StatementResponse {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, rename = "statementHandle")]
    pub statement_handle: Option<String>,

    #[serde(default, rename = "resultSetMetaData")]
    pub result_set_meta_data: Option<ResultSetMetaData>,

    #[serde(default)]
    pub data: Option<Vec<Vec<Option<String>>>>,
}

#[derive(Debug, Deserialize)]
pub struct ResultSetMetaData {
    #[serde(default, rename = "numRows")]
    pub num_rows: u64,

    #[serde(default, rename = "partitionInfo")]
    pub partition_info: Vec<PartitionInfo>,
}

#[derive(Debug, Deserialize)]
pub struct PartitionInfo {
    #[serde(default, rename = "rowCount")]
    pub row_count: u64,
}

/// Body returned when fetching an extra result partition
#[derive(Debug, Deserialize)]
pub struct PartitionResponse {
    #[serde(default)]
    pub data: Vec<Vec<Option<String>>>,
}
