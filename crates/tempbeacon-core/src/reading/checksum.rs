/// Unsigned byte-sum modulo 256.
pub fn byte_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte))
}

/// Two's-complement negation of the byte-sum, so that the sum of `bytes`
/// plus the returned checksum is zero modulo 256.
pub fn checksum_for(bytes: &[u8]) -> u8 {
    0u8.wrapping_sub(byte_sum(bytes))
}
