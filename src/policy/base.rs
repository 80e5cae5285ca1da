use std::sync::Arc;

use crate::util::bytes::Bytes;
use crate::util::constants::MAX_YOUNG_GENERATION_MBYTES;
use crate::util::conversions::{m, percent_of};
use crate::util::heap::MemoryInputs;

/// The sizing rules shared by all the policies.
///
/// None of the results is cached. The physical memory may only be probed after the first
/// query, and an explicit size may be set after startup (e.g. a command line option that is
/// parsed late), so every query recomputes from the inputs.
pub struct BasePolicy {
    inputs: Arc<dyn MemoryInputs>,
}

impl BasePolicy {
    pub fn new(inputs: Arc<dyn MemoryInputs>) -> Self {
        BasePolicy { inputs }
    }

    pub fn inputs(&self) -> &dyn MemoryInputs {
        &*self.inputs
    }

    /// An explicit maximum heap size wins unconditionally. Otherwise, if the physical memory is
    /// known, the maximum heap size is a fraction of it, but not more than the address space.
    /// If the physical memory is not known yet, it is the address space.
    pub fn maximum_heap_size(&self) -> Bytes {
        if let Some(max_heap) = self.inputs.configured_max_heap() {
            return max_heap;
        }

        let address_space = self.inputs.address_space_limit();
        if let Some(physical) = self.inputs.physical_memory() {
            let result = percent_of(physical, self.inputs.max_heap_size_percent());
            if result.below_than(address_space) {
                return result;
            }
        }
        address_space
    }

    /// An explicit maximum young generation size is used as is, but never more than the maximum
    /// heap size. Otherwise it is a fraction of the maximum heap size, but not more than 256 MB.
    pub fn maximum_young_generation_size(&self) -> Bytes {
        let max_heap = self.maximum_heap_size();
        if let Some(max_young) = self.inputs.configured_max_young() {
            return max_young.min(max_heap);
        }

        let young_size_as_fraction = percent_of(max_heap, self.inputs.max_young_size_percent());
        let max_size = m(MAX_YOUNG_GENERATION_MBYTES);
        if young_size_as_fraction.below_or_equal(max_size) {
            young_size_as_fraction
        } else {
            max_size
        }
    }

    /// An explicit minimum heap size is used as is, but never more than the maximum heap size.
    /// Otherwise it is twice the maximum young generation size, which delays the first complete
    /// collection until the young generation could have filled the heap twice.
    pub fn minimum_heap_size(&self) -> Bytes {
        let max_heap = self.maximum_heap_size();
        if let Some(min_heap) = self.inputs.configured_min_heap() {
            return min_heap.min(max_heap);
        }

        let result = self.maximum_young_generation_size() * 2;
        if result.above_than(max_heap) {
            max_heap
        } else {
            result
        }
    }

    /// The part of the minimum heap size that is not in use yet.
    pub fn maximum_free_reserved_size(&self) -> Bytes {
        let used = self.inputs.current_chunk_bytes();
        let min_heap = self.minimum_heap_size();
        if min_heap.above_than(used) {
            min_heap - used
        } else {
            Bytes::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::heap::MemorySnapshot;

    fn base(snapshot: MemorySnapshot) -> BasePolicy {
        BasePolicy::new(Arc::new(snapshot))
    }

    #[test]
    fn test_max_heap_without_physical_memory() {
        let policy = base(MemorySnapshot {
            address_space_limit: m(4096),
            ..Default::default()
        });
        assert_eq!(policy.maximum_heap_size(), m(4096));
    }

    #[test]
    fn test_max_heap_from_physical_memory() {
        let policy = base(MemorySnapshot {
            physical_memory: Some(m(1000)),
            max_heap_size_percent: 80,
            ..Default::default()
        });
        assert_eq!(policy.maximum_heap_size(), m(1000).unsigned_divide(100) * 80);
    }

    #[test]
    fn test_max_heap_clamped_to_address_space() {
        let policy = base(MemorySnapshot {
            physical_memory: Some(m(8192)),
            max_heap_size_percent: 100,
            address_space_limit: m(4096),
            ..Default::default()
        });
        assert_eq!(policy.maximum_heap_size(), m(4096));
    }

    #[test]
    fn test_max_heap_equal_to_address_space() {
        // The fraction must be strictly below the address space to be used.
        let policy = base(MemorySnapshot {
            physical_memory: Some(Bytes::new(10000)),
            max_heap_size_percent: 50,
            address_space_limit: Bytes::new(5000),
            ..Default::default()
        });
        assert_eq!(policy.maximum_heap_size(), Bytes::new(5000));
    }

    #[test]
    fn test_max_heap_override_wins() {
        let policy = base(MemorySnapshot {
            configured_max_heap: Some(m(100_000)),
            physical_memory: Some(m(1024)),
            address_space_limit: m(4096),
            ..Default::default()
        });
        assert_eq!(policy.maximum_heap_size(), m(100_000));
    }

    #[test]
    fn test_max_young_fraction() {
        let policy = base(MemorySnapshot {
            configured_max_heap: Some(m(1000)),
            max_young_size_percent: 10,
            ..Default::default()
        });
        assert_eq!(policy.maximum_young_generation_size(), m(100));
    }

    #[test]
    fn test_max_young_capped() {
        let policy = base(MemorySnapshot {
            configured_max_heap: Some(m(100_000)),
            max_young_size_percent: 100,
            ..Default::default()
        });
        assert_eq!(policy.maximum_young_generation_size(), m(256));
    }

    #[test]
    fn test_max_young_override() {
        let policy = base(MemorySnapshot {
            configured_max_heap: Some(m(100_000)),
            configured_max_young: Some(m(512)),
            ..Default::default()
        });
        // An explicit value is not capped at 256 MB.
        assert_eq!(policy.maximum_young_generation_size(), m(512));
    }

    #[test]
    fn test_max_young_override_above_max_heap() {
        let policy = base(MemorySnapshot {
            physical_memory: Some(m(100)),
            max_heap_size_percent: 50,
            configured_max_young: Some(m(512)),
            ..Default::default()
        });
        assert_eq!(
            policy.maximum_young_generation_size(),
            policy.maximum_heap_size()
        );
    }

    #[test]
    fn test_min_heap_twice_young() {
        let policy = base(MemorySnapshot {
            configured_max_heap: Some(m(1000)),
            max_young_size_percent: 10,
            ..Default::default()
        });
        assert_eq!(policy.minimum_heap_size(), m(200));
    }

    #[test]
    fn test_min_heap_capped_by_max_heap() {
        let policy = base(MemorySnapshot {
            configured_max_heap: Some(m(100)),
            max_young_size_percent: 100,
            ..Default::default()
        });
        assert_eq!(policy.maximum_young_generation_size(), m(100));
        assert_eq!(policy.minimum_heap_size(), m(100));
    }

    #[test]
    fn test_min_heap_override() {
        let policy = base(MemorySnapshot {
            configured_max_heap: Some(m(1000)),
            configured_min_heap: Some(m(10)),
            ..Default::default()
        });
        assert_eq!(policy.minimum_heap_size(), m(10));
    }

    #[test]
    fn test_free_reserved() {
        let policy = base(MemorySnapshot {
            configured_min_heap: Some(m(64)),
            chunk_bytes: m(16),
            ..Default::default()
        });
        assert_eq!(policy.maximum_free_reserved_size(), m(48));

        let policy = base(MemorySnapshot {
            configured_min_heap: Some(m(64)),
            chunk_bytes: m(128),
            ..Default::default()
        });
        assert_eq!(policy.maximum_free_reserved_size(), Bytes::ZERO);
    }

    #[test]
    fn test_zero_physical_memory() {
        let policy = base(MemorySnapshot {
            physical_memory: Some(Bytes::ZERO),
            ..Default::default()
        });
        assert_eq!(policy.maximum_heap_size(), Bytes::ZERO);
        assert_eq!(policy.maximum_young_generation_size(), Bytes::ZERO);
        assert_eq!(policy.minimum_heap_size(), Bytes::ZERO);
    }
}
