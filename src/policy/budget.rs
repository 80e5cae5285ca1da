use std::fmt;

use super::CollectionPolicy;
use crate::util::bytes::Bytes;

/// The sizes a policy derives from the current inputs. This is a copy for a driver
/// (or for printing), and is never stored by the policy: compute a new one whenever the
/// sizes are needed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeapBudget {
    pub max_heap: Bytes,
    pub max_young: Bytes,
    pub min_heap: Bytes,
    pub max_free_reserved: Bytes,
}

impl HeapBudget {
    /// Ask the policy for all the sizes.
    pub fn compute(policy: &dyn CollectionPolicy) -> Self {
        HeapBudget {
            max_heap: policy.maximum_heap_size(),
            max_young: policy.maximum_young_generation_size(),
            min_heap: policy.minimum_heap_size(),
            max_free_reserved: policy.maximum_free_reserved_size(),
        }
    }

    /// Do the sizes satisfy `min_heap <= max_heap` and `max_young <= max_heap`?
    /// The sizes are queried one after another, so this can only fail if the inputs changed
    /// in between.
    pub fn is_consistent(&self) -> bool {
        self.min_heap.below_or_equal(self.max_heap) && self.max_young.below_or_equal(self.max_heap)
    }
}

impl fmt::Display for HeapBudget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "max heap = {:.1} MB, max young = {:.1} MB, min heap = {:.1} MB, max free reserved = {:.1} MB",
            self.max_heap.as_mbytes_f64(),
            self.max_young.as_mbytes_f64(),
            self.min_heap.as_mbytes_f64(),
            self.max_free_reserved.as_mbytes_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::OnlyCompletely;
    use crate::util::conversions::m;
    use crate::util::heap::MemorySnapshot;
    use std::sync::Arc;

    #[test]
    fn test_compute() {
        let policy = OnlyCompletely::new(Arc::new(MemorySnapshot {
            configured_max_heap: Some(m(1000)),
            max_young_size_percent: 10,
            chunk_bytes: m(50),
            ..Default::default()
        }));
        let budget = HeapBudget::compute(&policy);
        assert_eq!(
            budget,
            HeapBudget {
                max_heap: m(1000),
                max_young: m(100),
                min_heap: m(200),
                max_free_reserved: m(150),
            }
        );
        assert!(budget.is_consistent());
        assert_eq!(
            budget.to_string(),
            "max heap = 1000.0 MB, max young = 100.0 MB, min heap = 200.0 MB, max free reserved = 150.0 MB"
        );
    }
}
