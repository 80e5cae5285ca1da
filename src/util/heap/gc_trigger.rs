use std::sync::Arc;
use std::time::Instant;

use crate::policy::CollectionPolicy;
use crate::util::heap::accounting::CollectionKind;
use crate::util::heap::inputs::{MemoryInputs, RuntimeMemoryInputs};

/// GCTrigger is the narrow interface between a collector driver and the selected policy.
/// Before a collection, the driver asks which kind of collection to run. After the
/// collection, it reports how long the collection took, which feeds the next decision.
///
/// We assume there is only one collector driver: collections do not overlap, and the
/// timings are only reported from the thread that ran the collection.
pub struct GCTrigger {
    /// The selected policy.
    policy: Box<dyn CollectionPolicy>,
    /// The inputs of the policy. The collection times are recorded here.
    inputs: Arc<RuntimeMemoryInputs>,
}

impl GCTrigger {
    pub fn new(policy: Box<dyn CollectionPolicy>, inputs: Arc<RuntimeMemoryInputs>) -> Self {
        GCTrigger { policy, inputs }
    }

    pub fn policy(&self) -> &dyn CollectionPolicy {
        &*self.policy
    }

    /// Decide the kind of the collection that is about to start. Returns `None` if the
    /// policy does not collect. The answer is only valid for this collection.
    pub fn decide(&self) -> Option<CollectionKind> {
        if !self.policy.collects() {
            trace!("[POLL] {}: not collecting", self.policy.name());
            return None;
        }
        let kind = CollectionKind::from_complete(self.policy.collect_completely());
        debug!("[POLL] {}: {:?} collection", self.policy.name(), kind);
        Some(kind)
    }

    /// Inform the trigger that a collection of the given kind ends.
    pub fn on_gc_end(&self, kind: CollectionKind, elapsed_nanos: u64) {
        self.inputs.timing.record(kind, elapsed_nanos);
    }

    /// Decide the kind of the collection, run `collect` with it, and record the time it took.
    /// Returns the kind of the collection, or `None` if the policy does not collect, in which
    /// case `collect` is not called.
    pub fn collect<F>(&self, collect: F) -> Option<CollectionKind>
    where
        F: FnOnce(CollectionKind),
    {
        let kind = self.decide()?;
        let start = Instant::now();
        collect(kind);
        let elapsed = start.elapsed();
        // A collection longer than 584 years saturates.
        let elapsed_nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.on_gc_end(kind, elapsed_nanos);
        Some(kind)
    }

    /// Is the heap full? The heap is full if the chunks in use exceed the maximum heap size.
    pub fn is_heap_full(&self) -> bool {
        self.inputs
            .current_chunk_bytes()
            .above_than(self.policy.maximum_heap_size())
    }
}
