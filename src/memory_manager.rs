//! Driver-to-policy interface: safe Rust APIs.
//!
//! This module provides the functions a collector driver calls. A driver:
//! 1. creates a [`GCPolicyBuilder`], sets options, and calls [`gcpolicy_init`] once at startup,
//! 2. keeps the host heap state current with [`update_heap_occupancy`] (and probes the
//!    physical memory with [`probe_physical_memory`] once it is able to),
//! 3. when a collection is triggered, calls [`collect_completely`] to decide the kind of the
//!    collection, runs it, and calls [`report_collection`] with the elapsed time.
//!
//! All the queries are synchronous, and only read the current inputs.

use crate::gcpolicy::{GCPolicy, GCPolicyBuilder};
use crate::policy::HeapBudget;
use crate::util::bytes::Bytes;
use crate::util::error::PolicyResult;
use crate::util::heap::CollectionKind;

/// Initialize the policy engine, and select the policy. This should be called exactly once.
/// A configuration error (an unknown policy name, an out-of-range percentage, contradictory
/// sizes) is returned, and the driver should not proceed without a policy.
///
/// Arguments:
/// * `builder`: The builder that holds the options and the registered policies.
pub fn gcpolicy_init(builder: &GCPolicyBuilder) -> PolicyResult<Box<GCPolicy>> {
    match crate::util::logger::try_init() {
        Ok(_) => debug!("gcpolicy initialized the logger."),
        Err(_) => debug!(
            "gcpolicy failed to initialize the logger. Possibly a logger has been initialized by user."
        ),
    }
    let gcpolicy = builder.build()?;
    info!(
        "Initialized gcpolicy {} with the {} policy",
        env!("CARGO_PKG_VERSION"),
        gcpolicy.policy().name()
    );
    Ok(Box::new(gcpolicy))
}

/// Probe the physical memory from the OS. Until this is called (or the physical memory is
/// set through `gcpolicy.inputs`), the heap is sized by the address space alone.
pub fn probe_physical_memory(gcpolicy: &GCPolicy) -> Option<Bytes> {
    gcpolicy.inputs.probe_physical_memory()
}

/// Update the occupancy of the heap. This can be called from any thread, at any time.
///
/// Arguments:
/// * `young`: The bytes in the young generation.
/// * `old`: The estimated bytes in the old generation.
/// * `chunk_bytes`: The bytes of the chunks the heap currently uses.
pub fn update_heap_occupancy(gcpolicy: &GCPolicy, young: Bytes, old: Bytes, chunk_bytes: Bytes) {
    gcpolicy.inputs.set_young_occupancy(young);
    gcpolicy.inputs.set_old_occupancy(old);
    gcpolicy.inputs.set_chunk_bytes(chunk_bytes);
}

/// Should the collection that is about to start be a complete collection?
pub fn collect_completely(gcpolicy: &GCPolicy) -> bool {
    gcpolicy.policy().collect_completely()
}

/// Decide the kind of the collection that is about to start, or `None` if the policy never collects.
pub fn decide_collection(gcpolicy: &GCPolicy) -> Option<CollectionKind> {
    gcpolicy.gc_trigger().decide()
}

/// Report a finished collection. This must be called from the thread that ran the collection,
/// after the collection, and before the next decision.
///
/// Arguments:
/// * `was_complete`: Whether the collection was a complete collection.
/// * `elapsed_nanos`: How long the collection took.
pub fn report_collection(gcpolicy: &GCPolicy, was_complete: bool, elapsed_nanos: u64) {
    gcpolicy
        .gc_trigger()
        .on_gc_end(CollectionKind::from_complete(was_complete), elapsed_nanos);
}

/// The current sizes of the heap.
pub fn heap_budget(gcpolicy: &GCPolicy) -> HeapBudget {
    gcpolicy.heap_budget()
}

/// The maximum size of the heap.
pub fn maximum_heap_size(gcpolicy: &GCPolicy) -> Bytes {
    gcpolicy.policy().maximum_heap_size()
}

/// The maximum size of the young generation.
pub fn maximum_young_generation_size(gcpolicy: &GCPolicy) -> Bytes {
    gcpolicy.policy().maximum_young_generation_size()
}

/// The heap size below which no complete collection is considered.
pub fn minimum_heap_size(gcpolicy: &GCPolicy) -> Bytes {
    gcpolicy.policy().minimum_heap_size()
}

/// The memory the allocator may keep reserved instead of returning it to the OS.
pub fn maximum_free_reserved_size(gcpolicy: &GCPolicy) -> Bytes {
    gcpolicy.policy().maximum_free_reserved_size()
}

/// The name of the selected policy.
pub fn policy_name(gcpolicy: &GCPolicy) -> &str {
    gcpolicy.policy().name()
}

/// Is the heap full?
pub fn is_heap_full(gcpolicy: &GCPolicy) -> bool {
    gcpolicy.gc_trigger().is_heap_full()
}
