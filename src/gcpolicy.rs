//! The policy engine context, and its builder.

use std::sync::{Arc, OnceLock};

use crate::policy::selector::{select_policy, PolicyFactory, PolicyRegistry};
use crate::policy::{CollectionPolicy, HeapBudget};
use crate::util::error::PolicyResult;
use crate::util::heap::{GCTrigger, RuntimeMemoryInputs};
use crate::util::options::Options;

/// GCPolicy builder. This is used to set options and register policies before the
/// policy is selected.
pub struct GCPolicyBuilder {
    /// The options for this instance.
    pub options: Options,
    registry: PolicyRegistry,
}

impl Default for GCPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GCPolicyBuilder {
    /// Create a builder. The options are the defaults, overridden by environment variables.
    pub fn new() -> Self {
        let mut builder = Self::new_no_env_vars();
        builder.options.read_env_var_settings();
        builder
    }

    /// Create a builder with the default options, ignoring environment variables.
    pub fn new_no_env_vars() -> Self {
        GCPolicyBuilder {
            options: Options::default(),
            registry: PolicyRegistry::default(),
        }
    }

    /// Set an option by its camel case name, e.g. `set_option("maxHeapSize", "1073741824")`.
    /// Returns false if the value is invalid.
    pub fn set_option(&mut self, name: &str, val: &str) -> bool {
        self.options.set_from_camelcase_str(name, val)
    }

    /// Register a policy that can then be selected by name through the `collection_policy` option.
    pub fn register_policy(&mut self, name: &str, factory: PolicyFactory) -> bool {
        self.registry.register(name, factory)
    }

    /// Validate the options, create the inputs and select the policy.
    pub fn build(&self) -> PolicyResult<GCPolicy> {
        self.options.validate()?;
        let inputs = Arc::new(RuntimeMemoryInputs::new(&self.options));
        let gcpolicy = GCPolicy::new(Arc::new(self.options.clone()), inputs);
        gcpolicy.initialize_policy(&self.registry)?;
        Ok(gcpolicy)
    }
}

/// An instance of the policy engine. A collector driver creates one at startup and keeps it
/// for the lifetime of the process. The selected policy never changes once it is initialized.
pub struct GCPolicy {
    pub options: Arc<Options>,
    /// The live inputs. The host runtime updates the occupancy through this.
    pub inputs: Arc<RuntimeMemoryInputs>,
    /// The trigger, with the selected policy. This is set exactly once in `initialize_policy()`.
    gc_trigger: OnceLock<GCTrigger>,
}

impl GCPolicy {
    /// Create an instance without a policy. Call `initialize_policy()` before using it.
    pub fn new(options: Arc<Options>, inputs: Arc<RuntimeMemoryInputs>) -> Self {
        GCPolicy {
            options,
            inputs,
            gc_trigger: OnceLock::new(),
        }
    }

    /// Select the policy from the options. This can only be done once: initializing again is a
    /// bug in the driver, and panics.
    pub fn initialize_policy(&self, registry: &PolicyRegistry) -> PolicyResult<()> {
        assert!(
            !self.is_initialized(),
            "The collection policy is already initialized"
        );
        let policy = select_policy(&self.options, registry, self.inputs.clone())?;
        if self
            .gc_trigger
            .set(GCTrigger::new(policy, self.inputs.clone()))
            .is_err()
        {
            panic!("The collection policy is already initialized");
        }
        Ok(())
    }

    /// Is the policy initialized?
    pub fn is_initialized(&self) -> bool {
        self.gc_trigger.get().is_some()
    }

    /// The trigger for the collector driver.
    pub fn gc_trigger(&self) -> &GCTrigger {
        self.gc_trigger
            .get()
            .unwrap_or_else(|| panic!("The collection policy is not initialized"))
    }

    /// The selected policy.
    pub fn policy(&self) -> &dyn CollectionPolicy {
        self.gc_trigger().policy()
    }

    /// Compute the current sizes.
    pub fn heap_budget(&self) -> HeapBudget {
        HeapBudget::compute(self.policy())
    }
}
