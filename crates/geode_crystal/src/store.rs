//! # Crystal Metric Storage
//!
//! Upsert-semantics storage collaborator for crystal rows, one per user,
//! plus an in-memory implementation for tests and harnesses.

use std::collections::BTreeMap;

use geode_core::StoreResult;

use crate::metrics::CrystalMetric;

/// Store of crystal metric rows, keyed by user.
pub trait CrystalMetricStore {
    /// Inserts or replaces the row for `metric.user_id`.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn upsert(&mut self, metric: CrystalMetric) -> StoreResult<()>;

    /// Reads the row for a user, if one has been calculated.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn get(&self, user_id: u64) -> StoreResult<Option<CrystalMetric>>;
}

/// In-memory crystal metric store.
#[derive(Clone, Debug, Default)]
pub struct MemoryCrystalMetricStore {
    rows: BTreeMap<u64, CrystalMetric>,
}

impl MemoryCrystalMetricStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl CrystalMetricStore for MemoryCrystalMetricStore {
    fn upsert(&mut self, metric: CrystalMetric) -> StoreResult<()> {
        self.rows.insert(metric.user_id, metric);
        Ok(())
    }

    fn get(&self, user_id: u64) -> StoreResult<Option<CrystalMetric>> {
        Ok(self.rows.get(&user_id).cloned())
    }
}
