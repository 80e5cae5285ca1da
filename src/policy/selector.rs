use std::sync::Arc;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use super::*;
use crate::util::error::{PolicyError, PolicyResult};
use crate::util::heap::MemoryInputs;
use crate::util::options::Options;

/// The built-in policies, by the names used in [`Options::collection_policy`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
pub enum PolicySelector {
    NeverCollect,
    OnlyIncrementally,
    OnlyCompletely,
    BySpaceAndTime,
}

impl PolicySelector {
    /// Create the policy.
    pub fn create(self, inputs: Arc<dyn MemoryInputs>) -> Box<dyn CollectionPolicy> {
        match self {
            PolicySelector::NeverCollect => Box::new(NeverCollect::new(inputs)),
            PolicySelector::OnlyIncrementally => Box::new(OnlyIncrementally::new(inputs)),
            PolicySelector::OnlyCompletely => Box::new(OnlyCompletely::new(inputs)),
            PolicySelector::BySpaceAndTime => Box::new(BySpaceAndTime::new(inputs)),
        }
    }

    fn factory(self) -> PolicyFactory {
        match self {
            PolicySelector::NeverCollect => |inputs| Ok(PolicySelector::NeverCollect.create(inputs)),
            PolicySelector::OnlyIncrementally => {
                |inputs| Ok(PolicySelector::OnlyIncrementally.create(inputs))
            }
            PolicySelector::OnlyCompletely => {
                |inputs| Ok(PolicySelector::OnlyCompletely.create(inputs))
            }
            PolicySelector::BySpaceAndTime => {
                |inputs| Ok(PolicySelector::BySpaceAndTime.create(inputs))
            }
        }
    }
}

/// Creates a policy. A factory may refuse, e.g. if the inputs do not fit the policy.
pub type PolicyFactory = fn(Arc<dyn MemoryInputs>) -> PolicyResult<Box<dyn CollectionPolicy>>;

/// Maps policy names to factories. The built-in policies are registered under their
/// [`PolicySelector`] names. A host runtime may register its own policies before the policy
/// is selected.
pub struct PolicyRegistry {
    factories: Vec<(String, PolicyFactory)>,
}

impl PolicyRegistry {
    /// A registry with no policies.
    pub fn empty() -> Self {
        PolicyRegistry { factories: vec![] }
    }

    /// Register a factory under a name. Returns false, and keeps the existing factory, if the
    /// name is already taken.
    pub fn register(&mut self, name: &str, factory: PolicyFactory) -> bool {
        if self.contains(name) {
            warn!("Policy {} is already registered", name);
            return false;
        }
        self.factories.push((name.to_string(), factory));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.iter().any(|(n, _)| n == name)
    }

    /// The registered names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.factories.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Create the policy registered under `name`.
    pub fn instantiate(
        &self,
        name: &str,
        inputs: Arc<dyn MemoryInputs>,
    ) -> PolicyResult<Box<dyn CollectionPolicy>> {
        let factory = self
            .factories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| *f)
            .ok_or_else(|| PolicyError::UnknownPolicy {
                name: name.to_string(),
                known: self.names(),
            })?;
        factory(inputs).map_err(|e| match e {
            PolicyError::InstantiationFailed { .. } => e,
            other => PolicyError::InstantiationFailed {
                name: name.to_string(),
                reason: other.to_string(),
            },
        })
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        let mut registry = PolicyRegistry::empty();
        for selector in PolicySelector::iter() {
            let name: &'static str = selector.into();
            registry.register(name, selector.factory());
        }
        registry
    }
}

/// Select the policy for the process. The runtime modes win over the configured name:
/// 1. Without a remembered set, an incremental collection is impossible: `OnlyCompletely`.
/// 2. If the runtime never collects: `NeverCollect`.
/// 3. Otherwise the policy registered under [`Options::collection_policy`].
///
/// An invalid configuration is an error. We never fall back to a default policy.
pub fn select_policy(
    options: &Options,
    registry: &PolicyRegistry,
    inputs: Arc<dyn MemoryInputs>,
) -> PolicyResult<Box<dyn CollectionPolicy>> {
    options.validate()?;

    let policy = if options.no_remembered_set {
        if options.collection_policy != PolicySelector::OnlyCompletely.to_string() {
            debug!(
                "Ignoring policy {}: there is no remembered set",
                options.collection_policy
            );
        }
        PolicySelector::OnlyCompletely.create(inputs)
    } else if options.never_collect {
        PolicySelector::NeverCollect.create(inputs)
    } else {
        registry.instantiate(&options.collection_policy, inputs)?
    };
    debug!("Selected collection policy: {}", policy.name());
    Ok(policy)
}
