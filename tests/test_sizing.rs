// Sizing invariants, over every combination of explicit sizes and physical memory.

extern crate gcpolicy;

use gcpolicy::policy::*;
use gcpolicy::util::conversions::m;
use gcpolicy::util::heap::MemorySnapshot;
use gcpolicy::util::Bytes;
use std::sync::Arc;

fn sizes() -> Vec<Option<Bytes>> {
    vec![
        None,
        Some(Bytes::new(1)),
        Some(m(64)),
        Some(m(4096)),
        Some(Bytes::MAX),
    ]
}

fn physical_memories() -> Vec<Option<Bytes>> {
    vec![
        None,
        Some(Bytes::ZERO),
        Some(Bytes::new(1)),
        Some(m(512)),
        Some(m(64 * 1024)),
        Some(Bytes::MAX),
    ]
}

/// All the combinations of explicit sizes, physical memory, address space and percentages.
fn snapshots() -> Vec<MemorySnapshot> {
    let mut result = vec![];
    for configured_max_heap in sizes() {
        for configured_min_heap in sizes() {
            for configured_max_young in sizes() {
                for physical_memory in physical_memories() {
                    for address_space_limit in [m(1024), Bytes::new(1 << 47), Bytes::MAX] {
                        for percent in [0, 10, 100] {
                            result.push(MemorySnapshot {
                                configured_max_heap,
                                configured_min_heap,
                                configured_max_young,
                                physical_memory,
                                address_space_limit,
                                max_heap_size_percent: percent,
                                max_young_size_percent: percent,
                                ..Default::default()
                            });
                        }
                    }
                }
            }
        }
    }
    result
}

#[test]
fn min_and_young_never_exceed_max() {
    for snapshot in snapshots() {
        let policy = BySpaceAndTime::new(Arc::new(snapshot.clone()));
        let budget = HeapBudget::compute(&policy);
        assert!(
            budget.min_heap.below_or_equal(budget.max_heap),
            "{:?} gives {}",
            snapshot,
            budget
        );
        assert!(
            budget.max_young.below_or_equal(budget.max_heap),
            "{:?} gives {}",
            snapshot,
            budget
        );
        assert!(budget.is_consistent());
    }
}

#[test]
fn derived_sizes_within_address_space() {
    for snapshot in snapshots()
        .into_iter()
        .filter(|s| s.configured_max_heap.is_none())
    {
        let policy = BySpaceAndTime::new(Arc::new(snapshot.clone()));
        let budget = HeapBudget::compute(&policy);
        assert!(budget
            .max_heap
            .below_or_equal(snapshot.address_space_limit));
        assert!(budget
            .min_heap
            .below_or_equal(snapshot.address_space_limit));
        assert!(budget
            .max_young
            .below_or_equal(snapshot.address_space_limit));
    }
}

#[test]
fn explicit_max_heap_is_returned_verbatim() {
    for snapshot in snapshots() {
        if let Some(max_heap) = snapshot.configured_max_heap {
            let policy = OnlyIncrementally::new(Arc::new(snapshot));
            assert_eq!(policy.maximum_heap_size(), max_heap);
        }
    }
}

#[test]
fn derived_young_never_exceeds_256_mb() {
    for snapshot in snapshots()
        .into_iter()
        .filter(|s| s.configured_max_young.is_none())
    {
        let policy = OnlyCompletely::new(Arc::new(snapshot));
        assert!(policy.maximum_young_generation_size().below_or_equal(m(256)));
    }
}

#[test]
fn physical_memory_known_late() {
    let mut snapshot = MemorySnapshot {
        address_space_limit: m(4096),
        max_heap_size_percent: 50,
        ..Default::default()
    };
    let early = BySpaceAndTime::new(Arc::new(snapshot.clone()));
    assert_eq!(early.maximum_heap_size(), m(4096));

    snapshot.physical_memory = Some(m(2000));
    let late = BySpaceAndTime::new(Arc::new(snapshot));
    assert_eq!(late.maximum_heap_size(), m(1000));
}

#[test]
fn queries_are_idempotent() {
    for snapshot in snapshots().into_iter().step_by(7) {
        let policy = BySpaceAndTime::new(Arc::new(snapshot));
        assert_eq!(HeapBudget::compute(&policy), HeapBudget::compute(&policy));
        assert_eq!(policy.collect_completely(), policy.collect_completely());
    }
}

#[test]
fn space_pressure_forces_complete() {
    for snapshot in snapshots().into_iter().step_by(5) {
        for (young, old) in [(m(1), m(1)), (m(512), m(512)), (Bytes::MAX, Bytes::ZERO)] {
            let snapshot = MemorySnapshot {
                young_occupancy: young,
                old_occupancy: old,
                incremental_nanos: 0,
                complete_nanos: 1_000_000,
                ..snapshot.clone()
            };
            let policy = BySpaceAndTime::new(Arc::new(snapshot));
            let estimate = young + policy.maximum_young_generation_size() + old;
            if estimate.above_than(policy.maximum_heap_size()) {
                assert!(policy.collect_completely());
            }
        }
    }
}

macro_rules! fixed_policy_test {
    ($policy:ident, $expected:expr) => {
        paste::paste! {
            #[test]
            fn [<$policy:snake _ignores_inputs>]() {
                for snapshot in snapshots().into_iter().step_by(3) {
                    for (incremental_nanos, complete_nanos) in [(0, 0), (1000, 0), (0, 1000)] {
                        let policy = $policy::new(Arc::new(MemorySnapshot {
                            incremental_nanos,
                            complete_nanos,
                            young_occupancy: Bytes::MAX,
                            chunk_bytes: Bytes::MAX,
                            ..snapshot.clone()
                        }));
                        assert_eq!(policy.collect_completely(), $expected);
                    }
                }
            }
        }
    };
}

fixed_policy_test!(NeverCollect, false);
fixed_policy_test!(OnlyIncrementally, false);
fixed_policy_test!(OnlyCompletely, true);

#[test]
fn policy_names() {
    let inputs = Arc::new(MemorySnapshot::default());
    assert_eq!(NeverCollect::new(inputs.clone()).name(), "never collect");
    assert_eq!(
        OnlyIncrementally::new(inputs.clone()).name(),
        "only incrementally"
    );
    assert_eq!(OnlyCompletely::new(inputs.clone()).name(), "only completely");
    assert_eq!(BySpaceAndTime::new(inputs).name(), "by space and time");
}
