pub const TIMESTAMP_RANGE: std::ops::Range<usize> = 0..4;
pub const TEMP_STATUS_RANGE: std::ops::Range<usize> = 4..6;
pub const ID_OFFSET: usize = 6;
pub const CHECKSUM_OFFSET: usize = 7;

/// Serialized packet size: timestamp + temp/status + id + checksum.
pub const READING_SIZE: usize = 4 + 2 + 1 + 1;

pub const STATUS_MASK: u16 = 1 << 15;
pub const TEMP_MASK: u16 = 0xFFFF >> 1;

/// Inclusive temperature bounds in tenths of a degree (20.0 to 120.0).
pub const TEMP_MIN_TENTHS: u16 = 200;
pub const TEMP_MAX_TENTHS: u16 = 1200;
