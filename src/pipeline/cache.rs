//! Memoization of operation results by exact parameter tuple.

use super::params::QueryParams;
use super::tables::{
    ClassBucketRow, ClassTotalRow, DayOfWeekRow, FeeBucketRow, RecentTransferRow, RouteBucketRow,
    RouteTotalRow, SummaryMetrics,
};
use dashmap::DashMap;
use log::debug;

/// The seven pipeline operations (distribution counts as two)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Summary,
    TimeSeries,
    RouteTotals,
    DistributionByBucket,
    DistributionTotals,
    RecentTransfers,
    DayOfWeek,
    Fees,
}

/// A cached table of any operation
#[derive(Debug, Clone)]
pub enum CachedTable {
    Summary(SummaryMetrics),
    TimeSeries(Vec<RouteBucketRow>),
    RouteTotals(Vec<RouteTotalRow>),
    DistributionByBucket(Vec<ClassBucketRow>),
    DistributionTotals(Vec<ClassTotalRow>),
    RecentTransfers(Vec<RecentTransferRow>),
    DayOfWeek(Vec<DayOfWeekRow>),
    Fees(Vec<FeeBucketRow>),
}

/// Conversion between an operation's table and the cache entry
pub trait Cacheable: Clone {
    fn into_cached(self) -> CachedTable;
    fn from_cached(entry: &CachedTable) -> Option<Self>;
}

macro_rules! cacheable {
    ($ty:ty, $variant:ident) => {
        impl Cacheable for $ty {
            fn into_cached(self) -> CachedTable {
                CachedTable::$variant(self)
            }

            fn from_cached(entry: &CachedTable) -> Option<Self> {
                match entry {
                    CachedTable::$variant(table) => Some(table.clone()),
                    _ => None,
                }
            }
        }
    };
}

cacheable!(SummaryMetrics, Summary);
cacheable!(Vec<RouteBucketRow>, TimeSeries);
cacheable!(Vec<RouteTotalRow>, RouteTotals);
cacheable!(Vec<ClassBucketRow>, DistributionByBucket);
cacheable!(Vec<ClassTotalRow>, DistributionTotals);
cacheable!(Vec<RecentTransferRow>, RecentTransfers);
cacheable!(Vec<DayOfWeekRow>, DayOfWeek);
cacheable!(Vec<FeeBucketRow>, Fees);

/// Result cache keyed by (operation, full parameter tuple)
///
/// A disabled cache stores nothing and always misses. Entries are never
/// evicted: every distinct parameter tuple stays until `clear` is called,
/// so long-lived callers issuing many distinct queries should clear it
/// periodically or build the pipeline with caching disabled.
#[derive(Debug)]
pub struct ResultCache {
    entries: DashMap<(Operation, QueryParams), CachedTable>,
    enabled: bool,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ResultCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: DashMap::new(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn get<T: Cacheable>(&self, operation: Operation, params: &QueryParams) -> Option<T> {
        if !self.enabled {
            return None;
        }

        let entry = self.entries.get(&(operation, params.clone()))?;
        let table = T::from_cached(entry.value());
        if table.is_some() {
            debug!("Cache hit for {:?}", operation);
        }
        table
    }

    pub fn insert<T: Cacheable>(&self, operation: Operation, params: &QueryParams, table: &T) {
        if self.enabled {
            self.entries
                .insert((operation, params.clone()), table.clone().into_cached());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
