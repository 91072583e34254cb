//! HTTP client for the warehouse statements endpoint.

use super::types::{
    Binding, EventQuery, PartitionResponse, RawEvent, StatementRequest, StatementResponse,
};
use super::TransferSource;
use crate::utils::config::{DEFAULT_EVENT_TABLE, DEFAULT_WAREHOUSE_TIMEOUT};
use crate::utils::error::SourceError;
use log::{debug, info, warn};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use std::collections::BTreeMap;

/// Warehouse client issuing parameterized statements
pub struct WarehouseClient {
    client: Client,
    base_url: String,
    auth_token: String,
    table: String,
}

impl WarehouseClient {
    /// Create a new warehouse client reading from the default event table
    pub fn new(
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(DEFAULT_WAREHOUSE_TIMEOUT)
            .build()
            .map_err(SourceError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&base_url.into()),
            auth_token: auth_token.into(),
            table: DEFAULT_EVENT_TABLE.to_string(),
        })
    }

    /// Read from a different event table
    ///
    /// The table name is part of the statement text, so only plain
    /// dotted identifiers are accepted.
    pub fn with_table(mut self, table: impl Into<String>) -> Result<Self, SourceError> {
        let table = table.into();
        if !is_valid_table_name(&table) {
            return Err(SourceError::InvalidTable(table));
        }
        self.table = table;
        Ok(self)
    }

    /// Submit a statement and collect every result row
    pub fn execute_statement(
        &self,
        request: &StatementRequest,
    ) -> Result<Vec<Vec<Option<String>>>, SourceError> {
        let url = format!("{}/api/v2/statements", self.base_url);
        debug!("Statement request: {:?}", request);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.auth_token)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .map_err(SourceError::RequestFailed)?;

        let body = read_statement_response(response)?;

        let partitions = body
            .result_set_meta_data
            .as_ref()
            .map(|meta| meta.partition_info.len())
            .unwrap_or(1);

        let mut rows = body.data.unwrap_or_default();

        if partitions > 1 {
            let handle = body.statement_handle.ok_or_else(|| {
                SourceError::InvalidResponse("Partitioned result without a handle".to_string())
            })?;
            for partition in 1..partitions {
                rows.extend(self.fetch_partition(&handle, partition)?);
            }
        }

        Ok(rows)
    }

    /// Fetch one extra result partition by statement handle
    fn fetch_partition(
        &self,
        handle: &str,
        partition: usize,
    ) -> Result<Vec<Vec<Option<String>>>, SourceError> {
        let url = format!("{}/api/v2/statements/{}", self.base_url, handle);
        debug!("Fetching partition {} of statement {}", partition, handle);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.auth_token)
            .header("Accept", "application/json")
            .query(&[("partition", partition)])
            .send()
            .map_err(SourceError::RequestFailed)?;

        if !response.status().is_success() {
            return Err(SourceError::InvalidResponse(format!(
                "HTTP {} while fetching partition {}",
                response.status(),
                partition
            )));
        }

        let body: PartitionResponse = response.json().map_err(SourceError::RequestFailed)?;
        Ok(body.data)
    }
}

impl TransferSource for WarehouseClient {
    fn fetch_events(&self, query: &EventQuery) -> Result<Vec<RawEvent>, SourceError> {
        info!(
            "Querying {} for {} events between {} and {}",
            self.table, query.token_symbol, query.start_date, query.end_date
        );

        let request = build_event_statement(&self.table, query);
        let rows = self.execute_statement(&request)?;

        info!("Warehouse returned {} rows", rows.len());

        Ok(rows.into_iter().map(row_to_event).collect())
    }
}

/// Build the event statement with every caller value bound, never inlined
pub fn build_event_statement(table: &str, query: &EventQuery) -> StatementRequest {
    let statement = format!(
        "SELECT created_at, id, data FROM {} \
         WHERE data:symbol::STRING = ? \
         AND created_at::date BETWEEN ? AND ?",
        table
    );

    let mut bindings = BTreeMap::new();
    bindings.insert("1".to_string(), Binding::text(&query.token_symbol));
    bindings.insert("2".to_string(), Binding::text(query.start_date.to_string()));
    bindings.insert("3".to_string(), Binding::text(query.end_date.to_string()));

    StatementRequest {
        statement,
        timeout: DEFAULT_WAREHOUSE_TIMEOUT.as_secs(),
        bindings,
    }
}

/// Convert a `[created_at, id, data]` result row into a raw event
pub fn row_to_event(row: Vec<Option<String>>) -> RawEvent {
    let mut columns = row.into_iter();
    let created_at = columns.next().flatten();
    let id = columns.next().flatten();
    let data = match columns.next().flatten() {
        Some(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("Unparseable data column for event {:?}: {}", id, e);
            serde_json::Value::Null
        }),
        None => serde_json::Value::Null,
    };

    RawEvent {
        created_at: created_at.map(serde_json::Value::String),
        id,
        data,
    }
}

/// Check status and decode a statement response
///
/// **Private** - shared by the submit path
fn read_statement_response(response: Response) -> Result<StatementResponse, SourceError> {
    let status = response.status();

    if status == StatusCode::ACCEPTED {
        let body: StatementResponse = response.json().map_err(SourceError::RequestFailed)?;
        return Err(SourceError::StatementPending(
            body.statement_handle.unwrap_or_default(),
        ));
    }

    if !status.is_success() {
        let text = response.text().unwrap_or_default();
        return Err(match serde_json::from_str::<StatementResponse>(&text) {
            Ok(body) if body.message.is_some() => SourceError::StatementFailed {
                code: body.code.unwrap_or_else(|| status.as_u16().to_string()),
                message: body.message.unwrap_or_default(),
            },
            _ => SourceError::InvalidResponse(format!("HTTP {}: {}", status, text)),
        });
    }

    response.json().map_err(SourceError::RequestFailed)
}

/// Strip trailing slashes so paths join cleanly
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn is_valid_table_name(table: &str) -> bool {
    !table.is_empty()
        && !table.starts_with('.')
        && !table.ends_with('.')
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
