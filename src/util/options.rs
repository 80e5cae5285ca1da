use crate::policy::selector::PolicySelector;
use crate::util::constants::*;
use crate::util::error::{PolicyError, PolicyResult};
use std::default::Default;

fn always_valid<T>(_: &T) -> bool {
    true
}

fn is_percent(v: &u32) -> bool {
    *v <= 100
}

/// The prefix of environment variables that set options, e.g. `GCPOLICY_MAX_HEAP_SIZE`.
pub const ENV_VAR_PREFIX: &str = "GCPOLICY_";

macro_rules! options {
    ($($name:ident: $type:ty[$validator:expr] = $default:expr),*,) => [
        options!($($name: $type[$validator] = $default),*);
    ];
    ($($name:ident: $type:ty[$validator:expr] = $default:expr),*) => [
        /// Options for the policy engine. Each option has a type, a validator and a default value.
        /// Options are set before the policy is selected, either programmatically through
        /// [`crate::GCPolicyBuilder::set_option`], or by environment variables with the prefix
        /// [`ENV_VAR_PREFIX`].
        #[derive(Clone, Debug)]
        pub struct Options {
            $(pub $name: $type),*
        }
        impl Options {
            /// Set an option from its snake case name. Returns false, and keeps the old value,
            /// if the value cannot be parsed or is rejected by the validator.
            pub fn set_from_str(&mut self, s: &str, val: &str) -> bool {
                match s {
                    // Parse the given value from str (by env vars or by calling set_option()) to the right type
                    $(stringify!($name) => if let Ok(ref val) = val.parse::<$type>() {
                        // Validate
                        let validate_fn = $validator;
                        let is_valid = validate_fn(val);
                        if is_valid {
                            // Only set value if valid.
                            self.$name = val.clone();
                        } else {
                            warn!("Unable to set {}={:?}. Invalid value. The old value will be used.", s, val);
                        }
                        is_valid
                    } else {
                        warn!("Unable to set {}={:?}. Can't parse value. The old value will be used.", s, val);
                        false
                    })*
                    _ => panic!("Invalid Options key: {}", s)
                }
            }

            /// Is `s` the snake case name of an option?
            pub fn is_option(s: &str) -> bool {
                matches!(s, $(stringify!($name))|*)
            }
        }
        impl Default for Options {
            fn default() -> Self {
                Options {
                    $($name: $default),*
                }
            }
        }
    ]
}

options! {
    // The name of the collection policy to select, unless a runtime mode forces one.
    collection_policy:               String [|v: &String| !v.is_empty()] = PolicySelector::BySpaceAndTime.to_string(),
    // Percentage of total collection time that should be spent on incremental collections.
    incremental_time_weight_percent: u32    [is_percent]                  = DEFAULT_INCREMENTAL_TIME_WEIGHT_PERCENT,
    // Explicit maximum heap size in bytes (like -Xmx). 0 means it is derived from physical memory.
    max_heap_size:                   usize  [always_valid]                = 0,
    // Explicit minimum heap size in bytes (like -Xms). 0 means it is derived from the young generation size.
    min_heap_size:                   usize  [always_valid]                = 0,
    // Explicit maximum young generation size in bytes (like -Xmn). 0 means it is derived from the maximum heap size.
    max_young_size:                  usize  [always_valid]                = 0,
    // Percentage of physical memory used as the maximum heap size.
    max_heap_size_percent:           u32    [is_percent]                  = DEFAULT_MAX_HEAP_SIZE_PERCENT,
    // Percentage of the maximum heap size used as the maximum young generation size.
    max_young_size_percent:          u32    [is_percent]                  = DEFAULT_MAX_YOUNG_SIZE_PERCENT,
    // The size of the address space the heap lives in. The heap never grows beyond this.
    address_space_size:              usize  [|v: &usize| *v > 0]          = DEFAULT_ADDRESS_SPACE_SIZE,
    // The runtime has no remembered set, so incremental collections are impossible.
    no_remembered_set:               bool   [always_valid]                = false,
    // The runtime never collects (e.g. an epsilon collector).
    never_collect:                   bool   [always_valid]                = false,
}

impl Options {
    /// Set an option from its camel case name, e.g. `maxHeapSize`.
    pub fn set_from_camelcase_str(&mut self, s: &str, val: &str) -> bool {
        trace!("Trying to process option pair: ({}, {})", s, val);

        let mut sr = String::with_capacity(s.len());
        for c in s.chars() {
            if c.is_uppercase() {
                sr.push('_');
                for c in c.to_lowercase() {
                    sr.push(c);
                }
            } else {
                sr.push(c)
            }
        }

        let result = self.set_from_str(sr.as_str(), val);

        if result {
            trace!("Validation passed");
        } else {
            trace!("Validation failed")
        }
        result
    }

    /// Read options from environment variables. If we have env vars that start with
    /// `GCPOLICY_` and match any option (such as `GCPOLICY_MAX_HEAP_SIZE`), we set the option
    /// to its value (if it is a valid value). Env vars that do not match any option are ignored.
    pub fn read_env_var_settings(&mut self) {
        for (key, val) in std::env::vars() {
            // strip the prefix, and get the lower case string
            if let Some(rest_of_key) = key.strip_prefix(ENV_VAR_PREFIX) {
                let lowercase: &str = &rest_of_key.to_lowercase();
                if Self::is_option(lowercase) {
                    self.set_from_str(lowercase, &val);
                }
            }
        }
    }

    /// Check the options against each other. The setters validate each value on its own,
    /// but the fields are public and may be assigned directly.
    pub fn validate(&self) -> PolicyResult<()> {
        if !is_percent(&self.incremental_time_weight_percent) {
            return Err(PolicyError::WeightOutOfRange(
                self.incremental_time_weight_percent,
            ));
        }
        for (option, value) in [
            ("max_heap_size_percent", self.max_heap_size_percent),
            ("max_young_size_percent", self.max_young_size_percent),
        ] {
            if !is_percent(&value) {
                return Err(PolicyError::PercentOutOfRange { option, value });
            }
        }
        if self.address_space_size == 0 {
            return Err(PolicyError::EmptyAddressSpace);
        }
        if self.max_heap_size != 0 {
            for (smaller, smaller_value) in [
                ("min_heap_size", self.min_heap_size),
                ("max_young_size", self.max_young_size),
            ] {
                if smaller_value > self.max_heap_size {
                    return Err(PolicyError::ContradictoryOverrides {
                        smaller,
                        smaller_value,
                        larger: "max_heap_size",
                        larger_value: self.max_heap_size,
                    });
                }
            }
        }
        Ok(())
    }
}
