//! Event sources for the metrics pipeline.
//!
//! The pipeline only ever reads. A source hands back raw events for a token
//! and date window; every derivation happens afterwards in the parser.

pub mod client;
pub mod file;
pub mod types;

pub use client::WarehouseClient;
pub use file::FileSource;
pub use types::{EventQuery, RawEvent};

use crate::utils::error::SourceError;

/// Anything that can produce raw bridging events for a query
///
/// Implementations may return events outside the query filter; the
/// pipeline re-applies the token and date filter after parsing.
pub trait TransferSource {
    fn fetch_events(&self, query: &EventQuery) -> Result<Vec<RawEvent>, SourceError>;
}

impl<T: TransferSource + ?Sized> TransferSource for &T {
    fn fetch_events(&self, query: &EventQuery) -> Result<Vec<RawEvent>, SourceError> {
        (**self).fetch_events(query)
    }
}

impl<T: TransferSource + ?Sized> TransferSource for Box<T> {
    fn fetch_events(&self, query: &EventQuery) -> Result<Vec<RawEvent>, SourceError> {
        (**self).fetch_events(query)
    }
}

/// Source backed by events already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    events: Vec<RawEvent>,
}

impl MemorySource {
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self { events }
    }
}

impl TransferSource for MemorySource {
    fn fetch_events(&self, _query: &EventQuery) -> Result<Vec<RawEvent>, SourceError> {
        Ok(self.events.clone())
    }
}
