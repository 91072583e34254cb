//! Caller-supplied query parameters.

use super::granularity::Granularity;
use crate::source::EventQuery;
use crate::utils::config::{
    DEFAULT_END_DATE, DEFAULT_EXCLUDED_CHAINS, DEFAULT_START_DATE, DEFAULT_TOKEN_SYMBOL,
};
use crate::utils::error::ParamError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Full parameter tuple of a pipeline operation
///
/// Also the cache key: two calls share a result only when every field
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryParams {
    /// First day in scope (inclusive)
    pub start_date: NaiveDate,

    /// Last day in scope (inclusive)
    pub end_date: NaiveDate,

    pub granularity: Granularity,

    /// Exact, case-sensitive token symbol
    pub token_symbol: String,

    /// Destination chains dropped from route-based views
    pub excluded_chains: Vec<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE,
            end_date: DEFAULT_END_DATE,
            granularity: Granularity::default(),
            token_symbol: DEFAULT_TOKEN_SYMBOL.to_string(),
            excluded_chains: DEFAULT_EXCLUDED_CHAINS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl QueryParams {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        granularity: Granularity,
        token_symbol: impl Into<String>,
    ) -> Self {
        Self {
            start_date,
            end_date,
            granularity,
            token_symbol: token_symbol.into(),
            excluded_chains: Vec::new(),
        }
    }

    pub fn with_excluded_chains<I, S>(mut self, chains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_chains = chains.into_iter().map(Into::into).collect();
        self
    }

    /// Reject parameters before anything is fetched
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.start_date > self.end_date {
            return Err(ParamError::InvalidDateRange {
                start: self.start_date.to_string(),
                end: self.end_date.to_string(),
            });
        }

        if self.token_symbol.trim().is_empty() {
            return Err(ParamError::EmptyToken);
        }

        Ok(())
    }

    /// Whether `date` falls inside the inclusive window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Filter pushed down to the event source
    pub fn event_query(&self) -> EventQuery {
        EventQuery {
            token_symbol: self.token_symbol.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = QueryParams::default();
        assert_eq!(params.start_date.to_string(), "2024-06-10");
        assert_eq!(params.end_date.to_string(), "2025-07-31");
        assert_eq!(params.granularity, Granularity::Month);
        assert_eq!(params.token_symbol, "ATH");
        assert_eq!(params.excluded_chains, vec!["Moonbeam".to_string()]);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let params = QueryParams {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(ParamError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_single_day_window_is_valid() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let params = QueryParams::new(day, day, Granularity::Day, "ATH");
        assert!(params.validate().is_ok());
        assert!(params.contains(day));
    }

    #[test]
    fn test_empty_token_rejected() {
        let params = QueryParams {
            token_symbol: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamError::EmptyToken));
    }
}
