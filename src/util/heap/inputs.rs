use atomic::{Atomic, Ordering};
use std::sync::OnceLock;

use crate::util::bytes::Bytes;
use crate::util::constants::*;
use crate::util::heap::accounting::TimingAccount;
use crate::util::options::Options;
use crate::util::os::memory::get_system_total_memory;

/// The values a collection policy reads to size the heap and to choose the kind of the next
/// collection. Every method is a side-effect-free read. The results may change between calls,
/// as the mutators allocate and the driver collects, so a policy must never cache them.
///
/// Reads may happen while mutators allocate. An implementation should return a consistent, if
/// possibly stale, value, e.g. by reading an atomic. The policy performs no locking.
pub trait MemoryInputs: Send + Sync {
    /// Explicit maximum heap size, or `None` if not set.
    fn configured_max_heap(&self) -> Option<Bytes>;
    /// Explicit minimum heap size, or `None` if not set.
    fn configured_min_heap(&self) -> Option<Bytes>;
    /// Explicit maximum young generation size, or `None` if not set.
    fn configured_max_young(&self) -> Option<Bytes>;
    /// The hard ceiling for the heap size.
    fn address_space_limit(&self) -> Bytes;
    /// The size of the physical memory, or `None` if the runtime has not probed it yet.
    fn physical_memory(&self) -> Option<Bytes>;
    /// Percentage of physical memory used as the maximum heap size. In `[0, 100]`.
    fn max_heap_size_percent(&self) -> u32;
    /// Percentage of the maximum heap size used as the maximum young generation size. In `[0, 100]`.
    fn max_young_size_percent(&self) -> u32;
    /// Bytes currently in the young generation.
    fn current_young_occupancy(&self) -> Bytes;
    /// Estimated bytes in the old generation (as measured after the last collection).
    fn current_old_occupancy_estimate(&self) -> Bytes;
    /// Bytes of chunks currently in use by the heap, over all generations.
    fn current_chunk_bytes(&self) -> Bytes;
    /// Accumulated nanoseconds spent in incremental collections.
    fn incremental_nanos(&self) -> u64;
    /// Accumulated nanoseconds spent in complete collections.
    fn complete_nanos(&self) -> u64;
    /// Percentage of total collection time that should be spent in incremental collections. In `[0, 100]`.
    fn incremental_time_weight_percent(&self) -> u32;
}

/// A plain copy of all the inputs at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub configured_max_heap: Option<Bytes>,
    pub configured_min_heap: Option<Bytes>,
    pub configured_max_young: Option<Bytes>,
    pub address_space_limit: Bytes,
    pub physical_memory: Option<Bytes>,
    pub max_heap_size_percent: u32,
    pub max_young_size_percent: u32,
    pub young_occupancy: Bytes,
    pub old_occupancy: Bytes,
    pub chunk_bytes: Bytes,
    pub incremental_nanos: u64,
    pub complete_nanos: u64,
    pub incremental_time_weight_percent: u32,
}

impl Default for MemorySnapshot {
    fn default() -> Self {
        MemorySnapshot {
            configured_max_heap: None,
            configured_min_heap: None,
            configured_max_young: None,
            address_space_limit: Bytes::from_usize(DEFAULT_ADDRESS_SPACE_SIZE),
            physical_memory: None,
            max_heap_size_percent: DEFAULT_MAX_HEAP_SIZE_PERCENT,
            max_young_size_percent: DEFAULT_MAX_YOUNG_SIZE_PERCENT,
            young_occupancy: Bytes::ZERO,
            old_occupancy: Bytes::ZERO,
            chunk_bytes: Bytes::ZERO,
            incremental_nanos: 0,
            complete_nanos: 0,
            incremental_time_weight_percent: DEFAULT_INCREMENTAL_TIME_WEIGHT_PERCENT,
        }
    }
}

impl MemoryInputs for MemorySnapshot {
    fn configured_max_heap(&self) -> Option<Bytes> {
        self.configured_max_heap
    }
    fn configured_min_heap(&self) -> Option<Bytes> {
        self.configured_min_heap
    }
    fn configured_max_young(&self) -> Option<Bytes> {
        self.configured_max_young
    }
    fn address_space_limit(&self) -> Bytes {
        self.address_space_limit
    }
    fn physical_memory(&self) -> Option<Bytes> {
        self.physical_memory
    }
    fn max_heap_size_percent(&self) -> u32 {
        self.max_heap_size_percent
    }
    fn max_young_size_percent(&self) -> u32 {
        self.max_young_size_percent
    }
    fn current_young_occupancy(&self) -> Bytes {
        self.young_occupancy
    }
    fn current_old_occupancy_estimate(&self) -> Bytes {
        self.old_occupancy
    }
    fn current_chunk_bytes(&self) -> Bytes {
        self.chunk_bytes
    }
    fn incremental_nanos(&self) -> u64 {
        self.incremental_nanos
    }
    fn complete_nanos(&self) -> u64 {
        self.complete_nanos
    }
    fn incremental_time_weight_percent(&self) -> u32 {
        self.incremental_time_weight_percent
    }
}

/// The live inputs of a running process. The host runtime updates the occupancy values as
/// its heap changes, and the collection trigger records the collection times in [`Self::timing`].
///
/// The explicit sizes can be changed after startup, e.g. when a command line option is parsed
/// late. Physical memory starts unknown and can be set exactly once.
pub struct RuntimeMemoryInputs {
    max_heap_size: Atomic<Bytes>,
    min_heap_size: Atomic<Bytes>,
    max_young_size: Atomic<Bytes>,
    max_heap_size_percent: u32,
    max_young_size_percent: u32,
    incremental_time_weight_percent: u32,
    address_space_size: Bytes,
    physical_memory: OnceLock<Bytes>,

    young_bytes: Atomic<Bytes>,
    old_bytes: Atomic<Bytes>,
    chunk_bytes: Atomic<Bytes>,

    /// The time spent in collections. Only the collection trigger writes this.
    pub timing: TimingAccount,
}

impl RuntimeMemoryInputs {
    /// Create the inputs from validated options. The generations are empty, and the
    /// physical memory is not known yet.
    pub fn new(options: &Options) -> Self {
        RuntimeMemoryInputs {
            max_heap_size: Atomic::new(Bytes::from_usize(options.max_heap_size)),
            min_heap_size: Atomic::new(Bytes::from_usize(options.min_heap_size)),
            max_young_size: Atomic::new(Bytes::from_usize(options.max_young_size)),
            max_heap_size_percent: options.max_heap_size_percent,
            max_young_size_percent: options.max_young_size_percent,
            incremental_time_weight_percent: options.incremental_time_weight_percent,
            address_space_size: Bytes::from_usize(options.address_space_size),
            physical_memory: OnceLock::new(),
            young_bytes: Atomic::new(Bytes::ZERO),
            old_bytes: Atomic::new(Bytes::ZERO),
            chunk_bytes: Atomic::new(Bytes::ZERO),
            timing: TimingAccount::new(),
        }
    }

    /// Probe the physical memory from the OS, unless it is already known. Returns the size,
    /// or `None` if the OS does not tell us.
    pub fn probe_physical_memory(&self) -> Option<Bytes> {
        if let Some(size) = self.physical_memory.get() {
            return Some(*size);
        }
        let probed = get_system_total_memory()?;
        let size = *self.physical_memory.get_or_init(|| probed);
        debug!("Physical memory is {:?}", size);
        Some(size)
    }

    /// Set the physical memory size. Returns false if it was already known, in which case
    /// the old value is kept.
    pub fn set_physical_memory(&self, size: Bytes) -> bool {
        self.physical_memory.set(size).is_ok()
    }

    /// Set the explicit maximum heap size. Zero unsets it.
    pub fn set_max_heap_size(&self, size: Bytes) {
        self.max_heap_size.store(size, Ordering::Relaxed);
    }

    /// Set the explicit minimum heap size. Zero unsets it.
    pub fn set_min_heap_size(&self, size: Bytes) {
        self.min_heap_size.store(size, Ordering::Relaxed);
    }

    /// Set the explicit maximum young generation size. Zero unsets it.
    pub fn set_max_young_size(&self, size: Bytes) {
        self.max_young_size.store(size, Ordering::Relaxed);
    }

    pub fn set_young_occupancy(&self, bytes: Bytes) {
        self.young_bytes.store(bytes, Ordering::Relaxed);
    }

    pub fn set_old_occupancy(&self, bytes: Bytes) {
        self.old_bytes.store(bytes, Ordering::Relaxed);
    }

    pub fn set_chunk_bytes(&self, bytes: Bytes) {
        self.chunk_bytes.store(bytes, Ordering::Relaxed);
    }

    /// Copy the current values.
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            configured_max_heap: self.configured_max_heap(),
            configured_min_heap: self.configured_min_heap(),
            configured_max_young: self.configured_max_young(),
            address_space_limit: self.address_space_limit(),
            physical_memory: self.physical_memory(),
            max_heap_size_percent: self.max_heap_size_percent(),
            max_young_size_percent: self.max_young_size_percent(),
            young_occupancy: self.current_young_occupancy(),
            old_occupancy: self.current_old_occupancy_estimate(),
            chunk_bytes: self.current_chunk_bytes(),
            incremental_nanos: self.incremental_nanos(),
            complete_nanos: self.complete_nanos(),
            incremental_time_weight_percent: self.incremental_time_weight_percent(),
        }
    }
}

impl MemoryInputs for RuntimeMemoryInputs {
    fn configured_max_heap(&self) -> Option<Bytes> {
        self.max_heap_size.load(Ordering::Relaxed).non_zero()
    }
    fn configured_min_heap(&self) -> Option<Bytes> {
        self.min_heap_size.load(Ordering::Relaxed).non_zero()
    }
    fn configured_max_young(&self) -> Option<Bytes> {
        self.max_young_size.load(Ordering::Relaxed).non_zero()
    }
    fn address_space_limit(&self) -> Bytes {
        self.address_space_size
    }
    fn physical_memory(&self) -> Option<Bytes> {
        self.physical_memory.get().copied()
    }
    fn max_heap_size_percent(&self) -> u32 {
        self.max_heap_size_percent
    }
    fn max_young_size_percent(&self) -> u32 {
        self.max_young_size_percent
    }
    fn current_young_occupancy(&self) -> Bytes {
        self.young_bytes.load(Ordering::Relaxed)
    }
    fn current_old_occupancy_estimate(&self) -> Bytes {
        self.old_bytes.load(Ordering::Relaxed)
    }
    fn current_chunk_bytes(&self) -> Bytes {
        self.chunk_bytes.load(Ordering::Relaxed)
    }
    fn incremental_nanos(&self) -> u64 {
        self.timing.incremental_nanos()
    }
    fn complete_nanos(&self) -> u64 {
        self.timing.complete_nanos()
    }
    fn incremental_time_weight_percent(&self) -> u32 {
        self.incremental_time_weight_percent
    }
}
