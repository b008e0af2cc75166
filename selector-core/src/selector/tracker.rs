//! Recomputation Tracking
//!
//! Every level of a composed selector owns one counter, incremented each
//! time that level misses its cache and runs its dependencies.
//!
//! Counters are sized when the selector is built. Reading them returns a
//! snapshot; resetting swaps in a fresh zeroed vector, so snapshots taken
//! earlier keep the values they had.

use std::sync::Arc;

use parking_lot::Mutex;

/// Shared per-level recomputation counters of one composed selector.
///
/// Cloning shares the counters.
#[derive(Debug, Clone)]
pub struct RecomputationTracker {
    counts: Arc<Mutex<Vec<u64>>>,
}

impl RecomputationTracker {
    pub fn new(levels: usize) -> Self {
        Self {
            counts: Arc::new(Mutex::new(vec![0; levels])),
        }
    }

    /// Number of tracked levels.
    pub fn len(&self) -> usize {
        self.counts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record one cache miss at `level`.
    pub fn bump(&self, level: usize) {
        if let Some(count) = self.counts.lock().get_mut(level) {
            *count += 1;
        }
    }

    /// Snapshot of the counters, one per level in build order.
    pub fn recomputations(&self) -> Vec<u64> {
        self.counts.lock().clone()
    }

    /// Replace the counters with zeros. Cached results are untouched.
    pub fn reset(&self) {
        let mut counts = self.counts.lock();
        *counts = vec![0; counts.len()];
    }
}
