//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading events from the upstream source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid warehouse response: {0}")]
    InvalidResponse(String),

    #[error("Statement failed ({code}): {message}")]
    StatementFailed { code: String, message: String },

    #[error("Statement still running after timeout: {0}")]
    StatementPending(String),

    #[error("Failed to read event file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Malformed event file: {0}")]
    MalformedFile(String),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),
}

/// Errors that can occur while turning a raw event into a transfer record
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Errors raised for caller-supplied parameters, before any fetch
#[derive(Error, Debug, PartialEq)]
pub enum ParamError {
    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Unknown granularity: {0} (expected day, week or month)")]
    UnknownGranularity(String),

    #[error("Token symbol cannot be empty")]
    EmptyToken,
}

/// Errors that can occur while running a pipeline operation
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidParams(#[from] ParamError),

    #[error("Event source unavailable: {0}")]
    Source(#[from] SourceError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
