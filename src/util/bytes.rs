use bytemuck::NoUninit;

use std::fmt;
use std::ops::*;

use crate::util::constants::{BYTES_IN_MBYTE, LOG_BYTES_IN_MBYTE};

/// Bytes is an unsigned count of bytes. The policies only size memory and never
/// dereference it, so this is a plain number rather than an address. All arithmetic
/// saturates: a size never wraps around and never becomes negative.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, Hash, PartialOrd, Ord, PartialEq, NoUninit)]
pub struct Bytes(u64);

/// Bytes + Bytes (saturating)
impl Add<Bytes> for Bytes {
    type Output = Bytes;
    fn add(self, other: Bytes) -> Bytes {
        Bytes(self.0.saturating_add(other.0))
    }
}

/// Bytes += Bytes (saturating)
impl AddAssign<Bytes> for Bytes {
    fn add_assign(&mut self, other: Bytes) {
        *self = *self + other;
    }
}

/// Bytes - Bytes (saturating at zero)
impl Sub<Bytes> for Bytes {
    type Output = Bytes;
    fn sub(self, other: Bytes) -> Bytes {
        Bytes(self.0.saturating_sub(other.0))
    }
}

/// Bytes * factor (saturating)
impl Mul<u64> for Bytes {
    type Output = Bytes;
    fn mul(self, factor: u64) -> Bytes {
        Bytes(self.0.saturating_mul(factor))
    }
}

impl Bytes {
    /// Zero bytes.
    pub const ZERO: Self = Bytes(0);
    /// The largest representable byte count.
    pub const MAX: Self = Bytes(u64::MAX);

    /// Creates a byte count.
    pub const fn new(bytes: u64) -> Bytes {
        Bytes(bytes)
    }

    /// Creates a byte count from a usize, e.g. a value from the options.
    pub const fn from_usize(bytes: usize) -> Bytes {
        Bytes(bytes as u64)
    }

    /// Whole megabytes to bytes. This is only meant for small constants, and
    /// does not check for overflow.
    pub const fn from_mbytes(mbytes: u64) -> Bytes {
        Bytes(mbytes << LOG_BYTES_IN_MBYTE)
    }

    /// Returns the raw byte count.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the byte count as megabytes, for printing.
    pub fn as_mbytes_f64(self) -> f64 {
        self.0 as f64 / BYTES_IN_MBYTE as f64
    }

    /// Is this zero?
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Unsigned division. Dividing by zero yields zero instead of panicking.
    pub const fn unsigned_divide(self, divisor: u64) -> Bytes {
        match self.0.checked_div(divisor) {
            Some(v) => Bytes(v),
            None => Bytes(0),
        }
    }

    /// self < other
    pub fn below_than(self, other: Bytes) -> bool {
        self.0 < other.0
    }

    /// self <= other
    pub fn below_or_equal(self, other: Bytes) -> bool {
        self.0 <= other.0
    }

    /// self > other
    pub fn above_than(self, other: Bytes) -> bool {
        self.0 > other.0
    }

    /// Turns a zero value into `None`. Options use zero to mean "not set".
    pub fn non_zero(self) -> Option<Bytes> {
        if self.is_zero() {
            None
        } else {
            Some(self)
        }
    }
}

impl From<u64> for Bytes {
    fn from(bytes: u64) -> Bytes {
        Bytes(bytes)
    }
}

impl From<Bytes> for u64 {
    fn from(bytes: Bytes) -> u64 {
        bytes.0
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} bytes ({:.1} MB)", self.0, self.as_mbytes_f64())
    }
}
