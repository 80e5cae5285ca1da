//! Probes of the operating system.

pub mod memory;
