use crate::util::bytes::Bytes;

/* Sizes */

/// Whole megabytes to bytes.
pub const fn m(mbytes: u64) -> Bytes {
    Bytes::from_mbytes(mbytes)
}

/// `percent` percent of `value`. We divide before we multiply so a value close to the
/// top of the unsigned range cannot overflow. The truncation error is accepted.
pub fn percent_of(value: Bytes, percent: u32) -> Bytes {
    debug_assert!(percent <= 100, "percent {} is out of range", percent);
    value.unsigned_divide(100) * percent as u64
}

/* Time */

/// `weight` percent of `nanos`. Multiply first when that cannot overflow, otherwise divide first.
pub fn weighted_nanos(weight: u32, nanos: u64) -> u64 {
    debug_assert!(weight <= 100, "weight {} is out of range", weight);
    match nanos.checked_mul(weight as u64) {
        Some(product) => product / 100,
        None => nanos / 100 * weight as u64,
    }
}

/// Is `a` less than `b`? Both are accumulated nanosecond counts, not timestamps.
pub fn nano_time_less_than(a: u64, b: u64) -> bool {
    a < b
}
