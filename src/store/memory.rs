//! In-memory record store.

use parking_lot::RwLock;
use tracing::debug;

use crate::error::EngineResult;

use super::{Collections, ScheduleStore};

/// A [`ScheduleStore`] holding every collection in memory.
///
/// Readers share the lock. A transaction holds the write lock from the
/// first read of its working copy until commit, so two overlapping writes
/// are serialized and each sees the other's committed result.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Creates a store with the given initial contents.
    pub fn new(collections: Collections) -> Self {
        Self {
            collections: RwLock::new(collections),
        }
    }

    /// Returns a copy of the current contents.
    pub fn snapshot(&self) -> Collections {
        self.collections.read().clone()
    }
}

impl ScheduleStore for MemoryStore {
    fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> R {
        let guard = self.collections.read();
        f(&guard)
    }

    fn transaction<R>(
        &self,
        f: impl FnOnce(&mut Collections) -> EngineResult<R>,
    ) -> EngineResult<R> {
        let mut guard = self.collections.write();
        let mut working = guard.clone();
        let result = f(&mut working)?;
        working.verify_integrity()?;
        debug!(
            plans = working.schedule_plans.len(),
            shifts = working.shifts.len(),
            "Store transaction committed"
        );
        *guard = working;
        Ok(result)
    }
}
