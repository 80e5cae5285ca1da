use std::sync::Arc;

use super::{BasePolicy, CollectionPolicy};
use crate::util::heap::MemoryInputs;

/// Every collection is complete. This is the only choice when the runtime has no remembered
/// set, as an incremental collection cannot find the old-to-young references without one.
pub struct OnlyCompletely {
    base: BasePolicy,
}

impl OnlyCompletely {
    pub fn new(inputs: Arc<dyn MemoryInputs>) -> Self {
        OnlyCompletely {
            base: BasePolicy::new(inputs),
        }
    }
}

impl CollectionPolicy for OnlyCompletely {
    fn base(&self) -> &BasePolicy {
        &self.base
    }

    fn collect_completely(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "only completely"
    }
}
