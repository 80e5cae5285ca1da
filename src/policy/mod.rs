//! Collection policies.
//!
//! A collection policy sizes the heap and decides the kind of each collection. Every policy
//! shares the sizing rules in [`BasePolicy`], and differs only in [`CollectionPolicy::collect_completely`].
//! A policy keeps no state of its own: every answer is computed from the current
//! [`MemoryInputs`](crate::util::heap::MemoryInputs), so asking twice with unchanged inputs gives
//! the same answer, and asking after the inputs changed never gives a stale one.

mod base;
pub use base::BasePolicy;

/// The sizes derived from a policy.
pub mod budget;
pub use budget::HeapBudget;

/// Selecting the policy at startup.
pub mod selector;

pub mod byspaceandtime;
pub mod nevercollect;
pub mod onlycompletely;
pub mod onlyincrementally;

pub use byspaceandtime::BySpaceAndTime;
pub use nevercollect::NeverCollect;
pub use onlycompletely::OnlyCompletely;
pub use onlyincrementally::OnlyIncrementally;

use crate::util::bytes::Bytes;
use crate::util::heap::MemoryInputs;
use downcast_rs::{impl_downcast, Downcast};

/// A collection policy answers the sizing and the collection kind questions of a collector driver.
///
/// Methods in this trait:
///
/// Only methods that may be overridden by a specific policy are included in this trait. The sizing
/// methods have default implementations that forward to [`BasePolicy`], which implements the rules
/// shared by all the policies. A policy is created once at startup and is shared read-only
/// for the lifetime of the process.
pub trait CollectionPolicy: 'static + Send + Sync + Downcast {
    /// The shared part of the policy.
    fn base(&self) -> &BasePolicy;

    /// The inputs this policy reads from.
    fn inputs(&self) -> &dyn MemoryInputs {
        self.base().inputs()
    }

    /// The maximum size of the heap.
    fn maximum_heap_size(&self) -> Bytes {
        self.base().maximum_heap_size()
    }

    /// The maximum size of the young generation.
    fn maximum_young_generation_size(&self) -> Bytes {
        self.base().maximum_young_generation_size()
    }

    /// The size the heap should reach before a complete collection is considered.
    fn minimum_heap_size(&self) -> Bytes {
        self.base().minimum_heap_size()
    }

    /// The amount of memory that may be kept reserved (committed but free) instead of being
    /// returned to the operating system.
    fn maximum_free_reserved_size(&self) -> Bytes {
        self.base().maximum_free_reserved_size()
    }

    /// Should the next collection be a complete collection? This is asked once when a collection
    /// is triggered, before any collection work starts. The answer only holds for that collection.
    fn collect_completely(&self) -> bool;

    /// Does this policy collect at all? A driver should not start a collection if this is false.
    fn collects(&self) -> bool {
        true
    }

    /// A human readable name for diagnostics.
    fn name(&self) -> &str;
}

impl_downcast!(CollectionPolicy);
