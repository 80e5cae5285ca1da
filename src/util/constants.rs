/// log2 of the number of bytes in a kilobyte
pub const LOG_BYTES_IN_KBYTE: u8 = 10;
/// The number of bytes in a kilobyte
pub const BYTES_IN_KBYTE: usize = 1 << LOG_BYTES_IN_KBYTE;

/// log2 of the number of bytes in a megabyte
pub const LOG_BYTES_IN_MBYTE: u8 = 20;
/// The number of bytes in a megabyte
pub const BYTES_IN_MBYTE: usize = 1 << LOG_BYTES_IN_MBYTE;

/// log2 of the number of bytes in a gigabyte
pub const LOG_BYTES_IN_GBYTE: u8 = 30;
/// The number of bytes in a gigabyte
pub const BYTES_IN_GBYTE: usize = 1 << LOG_BYTES_IN_GBYTE;

/// The absolute ceiling for a young generation whose size is derived from the maximum heap size.
/// An explicit young generation size is not limited by this.
pub const MAX_YOUNG_GENERATION_MBYTES: u64 = 256;

/// The percentage of physical memory used as the maximum heap size, unless set explicitly.
pub const DEFAULT_MAX_HEAP_SIZE_PERCENT: u32 = 80;
/// The percentage of the maximum heap size used as the maximum young generation size, unless set explicitly.
pub const DEFAULT_MAX_YOUNG_SIZE_PERCENT: u32 = 10;
/// The percentage of total collection time that should be spent in incremental collections.
pub const DEFAULT_INCREMENTAL_TIME_WEIGHT_PERCENT: u32 = 50;

#[cfg(target_pointer_width = "64")]
/// log2 of the usable address space in bytes
pub const LOG_BYTES_IN_ADDRESS_SPACE: u8 = 47;
#[cfg(target_pointer_width = "64")]
/// The default address space limit. The heap can never grow beyond this.
pub const DEFAULT_ADDRESS_SPACE_SIZE: usize = 1 << LOG_BYTES_IN_ADDRESS_SPACE;

#[cfg(target_pointer_width = "32")]
/// log2 of the usable address space in bytes
pub const LOG_BYTES_IN_ADDRESS_SPACE: u8 = 32;
#[cfg(target_pointer_width = "32")]
/// The default address space limit. The heap can never grow beyond this.
pub const DEFAULT_ADDRESS_SPACE_SIZE: usize = usize::MAX;

// A derived young generation must always fit in the default address space.
const_assert!(MAX_YOUNG_GENERATION_MBYTES << LOG_BYTES_IN_MBYTE <= DEFAULT_ADDRESS_SPACE_SIZE as u64);
const_assert!(DEFAULT_INCREMENTAL_TIME_WEIGHT_PERCENT <= 100);
