use std::sync::Arc;

use super::{BasePolicy, CollectionPolicy};
use crate::util::bytes::Bytes;
use crate::util::conversions::{nano_time_less_than, weighted_nanos};
use crate::util::heap::MemoryInputs;

/// A collection policy that delays complete collections until the heap has at least the
/// minimum heap size in use, and then tries to balance the time spent in incremental and
/// complete collections.
///
/// A complete collection is chosen if either
/// 1. the next incremental collection could push the heap over its maximum size, assuming
///    the whole young generation, and then another full young generation, gets promoted, or
/// 2. the heap is above its minimum size, and incremental collections have taken more than
///    their share (`incremental_time_weight_percent`) of the total collection time.
///
/// The second rule is a feedback loop: it does not schedule complete collections on a fixed
/// period, but reacts to the measured cost, so the share of incremental collection time
/// converges to the configured weight over the life of the process.
pub struct BySpaceAndTime {
    base: BasePolicy,
}

impl BySpaceAndTime {
    pub fn new(inputs: Arc<dyn MemoryInputs>) -> Self {
        BySpaceAndTime {
            base: BasePolicy::new(inputs),
        }
    }

    /// Estimates the heap size at the next incremental collection assuming that the whole
    /// current young generation gets promoted.
    pub fn estimate_used_heap_at_next_incremental_collection(&self) -> Bytes {
        let inputs = self.inputs();
        let current_young_bytes = inputs.current_young_occupancy();
        let max_young_bytes = self.maximum_young_generation_size();
        let old_bytes = inputs.current_old_occupancy_estimate();
        current_young_bytes + max_young_bytes + old_bytes
    }

    /// Have the incremental collections taken more than their share of the total collection time?
    pub fn enough_time_spent_on_incremental_collections(&self) -> bool {
        let inputs = self.inputs();
        // The weight is validated when the policy is selected.
        let incremental_weight = inputs.incremental_time_weight_percent();

        let actual_incremental_nanos = inputs.incremental_nanos();
        let complete_nanos = inputs.complete_nanos();
        let total_nanos = actual_incremental_nanos.saturating_add(complete_nanos);
        let expected_incremental_nanos = weighted_nanos(incremental_weight, total_nanos);
        trace!(
            "incremental: {} ns, complete: {} ns, expected incremental: {} ns ({}%)",
            actual_incremental_nanos,
            complete_nanos,
            expected_incremental_nanos,
            incremental_weight
        );
        nano_time_less_than(expected_incremental_nanos, actual_incremental_nanos)
    }
}

impl CollectionPolicy for BySpaceAndTime {
    fn base(&self) -> &BasePolicy {
        &self.base
    }

    fn collect_completely(&self) -> bool {
        let max_heap = self.maximum_heap_size();
        let estimate = self.estimate_used_heap_at_next_incremental_collection();
        if estimate.above_than(max_heap) {
            debug!(
                "Complete collection: estimated heap {:?} after the next incremental collection exceeds the maximum heap {:?}",
                estimate, max_heap
            );
            return true;
        }

        let used = self.inputs().current_chunk_bytes();
        let min_heap = self.minimum_heap_size();
        if used.above_than(min_heap) && self.enough_time_spent_on_incremental_collections() {
            debug!(
                "Complete collection: used {:?} is above the minimum heap {:?}, and incremental collections took their share of time",
                used, min_heap
            );
            return true;
        }
        false
    }

    fn name(&self) -> &str {
        "by space and time"
    }
}
