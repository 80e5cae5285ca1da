use std::sync::Arc;

use super::{BasePolicy, CollectionPolicy};
use crate::util::heap::MemoryInputs;

/// The policy for a runtime that never collects (e.g. an epsilon collector). The heap
/// is still sized, so an allocator knows when it runs out of memory.
pub struct NeverCollect {
    base: BasePolicy,
}

impl NeverCollect {
    pub fn new(inputs: Arc<dyn MemoryInputs>) -> Self {
        NeverCollect {
            base: BasePolicy::new(inputs),
        }
    }
}

impl CollectionPolicy for NeverCollect {
    fn base(&self) -> &BasePolicy {
        &self.base
    }

    fn collect_completely(&self) -> bool {
        false
    }

    fn collects(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "never collect"
    }
}
