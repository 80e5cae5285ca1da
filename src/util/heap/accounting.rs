use enum_map::{Enum, EnumMap};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// The kind of a collection cycle.
#[derive(Clone, Copy, Debug, Enum, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Only the young generation is collected.
    Incremental,
    /// The whole heap is collected.
    Complete,
}

impl CollectionKind {
    /// The kind for the answer of `collect_completely()`.
    pub fn from_complete(complete: bool) -> Self {
        if complete {
            CollectionKind::Complete
        } else {
            CollectionKind::Incremental
        }
    }

    pub fn is_complete(self) -> bool {
        self == CollectionKind::Complete
    }
}

/// The struct accumulates the time spent in each kind of collection.
///
/// The counters only grow. They are written by the single thread that runs collections,
/// after a cycle finishes, and read by the policy before the next cycle. The atomics let
/// other threads read a (possibly stale) value, but we do not support concurrent writers:
/// each update is a load followed by a store.
#[derive(Default)]
pub struct TimingAccount {
    /// Accumulated nanoseconds per kind of collection.
    nanos: EnumMap<CollectionKind, AtomicU64>,
    /// Number of finished collections per kind.
    collections: EnumMap<CollectionKind, AtomicUsize>,
}

impl TimingAccount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inform of a finished collection of the given kind that took `elapsed_nanos`.
    pub fn record(&self, kind: CollectionKind, elapsed_nanos: u64) {
        let counter = &self.nanos[kind];
        let total = counter.load(Ordering::Relaxed).saturating_add(elapsed_nanos);
        counter.store(total, Ordering::Relaxed);

        let count = &self.collections[kind];
        count.store(count.load(Ordering::Relaxed) + 1, Ordering::Relaxed);

        trace!(
            "{:?} collection took {} ns, accumulated {} ns in {} collections",
            kind,
            elapsed_nanos,
            total,
            count.load(Ordering::Relaxed)
        );
    }

    /// Accumulated nanoseconds in collections of the given kind.
    pub fn nanos(&self, kind: CollectionKind) -> u64 {
        self.nanos[kind].load(Ordering::Relaxed)
    }

    pub fn incremental_nanos(&self) -> u64 {
        self.nanos(CollectionKind::Incremental)
    }

    pub fn complete_nanos(&self) -> u64 {
        self.nanos(CollectionKind::Complete)
    }

    /// Accumulated nanoseconds in all collections.
    pub fn total_nanos(&self) -> u64 {
        self.incremental_nanos()
            .saturating_add(self.complete_nanos())
    }

    /// Number of finished collections of the given kind.
    pub fn collection_count(&self, kind: CollectionKind) -> usize {
        self.collections[kind].load(Ordering::Relaxed)
    }

    /// Set all the counters to zero.
    pub fn reset(&self) {
        for (_, counter) in self.nanos.iter() {
            counter.store(0, Ordering::Relaxed);
        }
        for (_, count) in self.collections.iter() {
            count.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let account = TimingAccount::new();
        account.record(CollectionKind::Incremental, 100);
        account.record(CollectionKind::Incremental, 50);
        account.record(CollectionKind::Complete, 1000);

        assert_eq!(account.incremental_nanos(), 150);
        assert_eq!(account.complete_nanos(), 1000);
        assert_eq!(account.total_nanos(), 1150);
        assert_eq!(account.collection_count(CollectionKind::Incremental), 2);
        assert_eq!(account.collection_count(CollectionKind::Complete), 1);
    }

    #[test]
    fn test_record_saturates() {
        let account = TimingAccount::new();
        account.record(CollectionKind::Complete, u64::MAX);
        account.record(CollectionKind::Complete, 1);
        assert_eq!(account.complete_nanos(), u64::MAX);

        account.record(CollectionKind::Incremental, 1);
        assert_eq!(account.total_nanos(), u64::MAX);
    }

    #[test]
    fn test_reset() {
        let account = TimingAccount::new();
        account.record(CollectionKind::Incremental, 100);
        account.reset();
        assert_eq!(account.total_nanos(), 0);
        assert_eq!(account.collection_count(CollectionKind::Incremental), 0);
    }

    #[test]
    fn test_kind_from_complete() {
        assert_eq!(CollectionKind::from_complete(true), CollectionKind::Complete);
        assert_eq!(
            CollectionKind::from_complete(false),
            CollectionKind::Incremental
        );
        assert!(CollectionKind::Complete.is_complete());
    }
}
