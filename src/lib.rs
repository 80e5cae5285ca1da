//! gcpolicy is the heap-sizing and collection-policy engine for a generational
//! garbage collector. It does not move, mark or sweep anything. It answers the
//! questions a collector driver asks before and after each collection cycle:
//!
//! * How large may the heap and its young generation grow?
//! * How large must the heap become before a complete collection is considered?
//! * Should the next collection be incremental (young generation only) or complete?
//!
//! The engine is created once at startup through a [`GCPolicyBuilder`]
//! (see [`memory_manager::gcpolicy_init`]). The builder reads the [`util::options::Options`],
//! selects one of the [`policy`] variants, and returns a [`GCPolicy`] context which the
//! driver keeps for the rest of the process lifetime. The driver feeds back the time it
//! spent in each cycle through [`memory_manager::report_collection`], which the adaptive
//! [`policy::BySpaceAndTime`] policy uses to balance incremental and complete collections.
//!
//! The live values the policies consume (physical memory, generation occupancy, collection
//! timings) are accessed through the [`util::heap::MemoryInputs`] trait. A host runtime
//! updates a [`util::heap::RuntimeMemoryInputs`] as its heap changes.

#[cfg(test)]
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate static_assertions;

mod gcpolicy;
pub use gcpolicy::GCPolicy;
pub use gcpolicy::GCPolicyBuilder;

pub mod memory_manager;
pub mod policy;
pub mod util;
