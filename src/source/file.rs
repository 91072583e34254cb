//! Local JSON export of the event table.
//!
//! Accepts either a JSON array of events or JSON Lines.

use super::types::{EventQuery, RawEvent};
use super::TransferSource;
use crate::utils::error::SourceError;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Source reading raw events from a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransferSource for FileSource {
    fn fetch_events(&self, query: &EventQuery) -> Result<Vec<RawEvent>, SourceError> {
        info!(
            "Reading {} events from {}",
            query.token_symbol,
            self.path.display()
        );

        let content = std::fs::read_to_string(&self.path)?;
        let events = parse_events(&content)?;

        debug!("Loaded {} raw events", events.len());

        Ok(events)
    }
}

/// Parse file content as a JSON array or as JSON Lines
pub fn parse_events(content: &str) -> Result<Vec<RawEvent>, SourceError> {
    let trimmed = content.trim_start();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| SourceError::MalformedFile(format!("JSON array: {}", e)));
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map_err(|e| SourceError::MalformedFile(format!("line {}: {}", index + 1, e)))
        })
        .collect()
}
