use std::sync::Arc;

use super::{BasePolicy, CollectionPolicy};
use crate::util::heap::MemoryInputs;

/// Every collection is incremental. This is for runtimes that cannot do a complete collection.
pub struct OnlyIncrementally {
    base: BasePolicy,
}

impl OnlyIncrementally {
    pub fn new(inputs: Arc<dyn MemoryInputs>) -> Self {
        OnlyIncrementally {
            base: BasePolicy::new(inputs),
        }
    }
}

impl CollectionPolicy for OnlyIncrementally {
    fn base(&self) -> &BasePolicy {
        &self.base
    }

    fn collect_completely(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "only incrementally"
    }
}
