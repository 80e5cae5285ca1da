/// Result of configuring or selecting a policy.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Configuration errors. They are reported once, when the policy is selected at startup.
/// A policy is never constructed from a configuration that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// No policy is registered under the configured name.
    #[error("Policy {name} does not exist. Known policies: {}", .known.join(", "))]
    UnknownPolicy {
        /// The configured name
        name: String,
        /// The registered names
        known: Vec<String>,
    },

    /// The factory registered under the name refused to create a policy.
    #[error("Policy {name} cannot be instantiated: {reason}")]
    InstantiationFailed {
        /// The configured name
        name: String,
        /// Why the factory failed
        reason: String,
    },

    /// The incremental time weight is not a percentage.
    #[error("incremental_time_weight_percent should be in the range [0..100], got {0}")]
    WeightOutOfRange(u32),

    /// A size percentage is not a percentage.
    #[error("{option} should be in the range [0..100], got {value}")]
    PercentOutOfRange {
        /// The option name
        option: &'static str,
        /// The configured value
        value: u32,
    },

    /// Two explicit sizes contradict each other, e.g. a minimum heap larger than the maximum heap.
    #[error("{smaller} ({smaller_value}) must not be larger than {larger} ({larger_value})")]
    ContradictoryOverrides {
        /// The option that should be the smaller one
        smaller: &'static str,
        /// Its value
        smaller_value: usize,
        /// The option that should be the larger one
        larger: &'static str,
        /// Its value
        larger_value: usize,
    },

    /// The address space limit is zero.
    #[error("address_space_size must be positive")]
    EmptyAddressSpace,
}
