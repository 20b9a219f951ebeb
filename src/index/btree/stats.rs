//! Tree operation statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the operations and structural changes a tree performs.
///
/// Counters are atomic so that read-only paths (`search(&self)`) can still
/// record work without needing `&mut`.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` for all operations because:
/// - We only need atomicity (no partial updates)
/// - We don't need synchronization between different counters
/// - Statistics are "eventually consistent" - exact ordering doesn't matter
///
/// # Example
/// ```
/// use bplustree::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.leaf_splits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.snapshot().leaf_splits, 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// New keys added.
    pub inserts: AtomicU64,

    /// Inserts that overwrote the value of an existing key.
    pub updates: AtomicU64,

    /// Keys actually removed (deletes of absent keys are not counted).
    pub deletes: AtomicU64,

    /// Point and range searches served.
    pub searches: AtomicU64,

    /// Overflowing leaves split in two.
    pub leaf_splits: AtomicU64,

    /// Overflowing internal nodes split in two.
    pub internal_splits: AtomicU64,

    /// Empty nodes refilled from a sibling.
    pub borrows: AtomicU64,

    /// Empty nodes folded into a sibling.
    pub merges: AtomicU64,

    /// Times an empty root was replaced by its only child.
    pub root_collapses: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            inserts: AtomicU64::new(0),
            updates: AtomicU64::new(0),
            deletes: AtomicU64::new(0),
            searches: AtomicU64::new(0),
            leaf_splits: AtomicU64::new(0),
            internal_splits: AtomicU64::new(0),
            borrows: AtomicU64::new(0),
            merges: AtomicU64::new(0),
            root_collapses: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            leaf_splits: self.leaf_splits.load(Ordering::Relaxed),
            internal_splits: self.internal_splits.load(Ordering::Relaxed),
            borrows: self.borrows.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
            root_collapses: self.root_collapses.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::Relaxed);
        self.updates.store(0, Ordering::Relaxed);
        self.deletes.store(0, Ordering::Relaxed);
        self.searches.store(0, Ordering::Relaxed);
        self.leaf_splits.store(0, Ordering::Relaxed);
        self.internal_splits.store(0, Ordering::Relaxed);
        self.borrows.store(0, Ordering::Relaxed);
        self.merges.store(0, Ordering::Relaxed);
        self.root_collapses.store(0, Ordering::Relaxed);
    }

    /// Emits current statistics as a single tracing event.
    pub fn emit_tracing(&self) {
        let snapshot = self.snapshot();
        tracing::info!(
            target: "bplustree::stats",
            inserts = snapshot.inserts,
            updates = snapshot.updates,
            deletes = snapshot.deletes,
            searches = snapshot.searches,
            leaf_splits = snapshot.leaf_splits,
            internal_splits = snapshot.internal_splits,
            borrows = snapshot.borrows,
            merges = snapshot.merges,
            root_collapses = snapshot.root_collapses,
            "tree stats snapshot"
        );
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of tree statistics.
///
/// Unlike `TreeStats`, this is not atomic and can be safely
/// printed, compared, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub inserts: u64,
    pub updates: u64,
    pub deletes: u64,
    pub searches: u64,
    pub leaf_splits: u64,
    pub internal_splits: u64,
    pub borrows: u64,
    pub merges: u64,
    pub root_collapses: u64,
}

impl StatsSnapshot {
    /// Total structural changes (splits, borrows, merges, collapses).
    pub fn restructures(&self) -> u64 {
        self.leaf_splits + self.internal_splits + self.borrows + self.merges + self.root_collapses
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, updates: {}, deletes: {}, searches: {}, splits: {}/{}, borrows: {}, merges: {}, collapses: {} }}",
            self.inserts,
            self.updates,
            self.deletes,
            self.searches,
            self.leaf_splits,
            self.internal_splits,
            self.borrows,
            self.merges,
            self.root_collapses
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_bump_and_snapshot() {
        let stats = TreeStats::new();
        TreeStats::bump(&stats.leaf_splits);
        TreeStats::bump(&stats.leaf_splits);
        TreeStats::bump(&stats.merges);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.leaf_splits, 2);
        assert_eq!(snapshot.merges, 1);
        assert_eq!(snapshot.restructures(), 3);
    }

    #[test]
    fn test_stats_reset() {
        let stats = TreeStats::new();
        stats.inserts.fetch_add(100, Ordering::Relaxed);

        stats.reset();

        assert_eq!(stats.inserts.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats::new();
        stats.inserts.fetch_add(7, Ordering::Relaxed);
        stats.leaf_splits.fetch_add(2, Ordering::Relaxed);
        stats.internal_splits.fetch_add(1, Ordering::Relaxed);

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("inserts: 7"));
        assert!(display.contains("splits: 2/1"));
    }
}
