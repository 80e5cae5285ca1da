//! Utilities shared by the policies: byte arithmetic, constants, options, logging and
//! the heap inputs a policy reads from.

/// The unsigned byte count type used in every sizing computation.
pub mod bytes;
/// Constants for sizes.
pub mod constants;
/// Percentage and time conversions.
pub mod conversions;
/// Errors reported while configuring a policy.
pub mod error;
/// Heap inputs, timing accounting and the collection trigger.
pub mod heap;
/// Logger initialization
pub mod logger;
/// Runtime options.
pub mod options;
/// Operating system probes.
pub mod os;

#[cfg(test)]
pub(crate) mod test_util;

pub use self::bytes::Bytes;
pub use self::error::PolicyError;
