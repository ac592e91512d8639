use thiserror::Error;

/// Errors returned by reading decoding.
///
/// A checksum mismatch is not a decode error; see
/// [`validate`](crate::validate).
///
/// # Examples
/// ```
/// use tempbeacon_core::{DecodeError, decode};
///
/// let err = decode(&[0u8; 3]).unwrap_err();
/// assert!(matches!(err, DecodeError::MalformedLength { expected: 8, actual: 3 }));
/// assert!(err.to_string().contains("malformed reading length"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed reading length: expected {expected} bytes, got {actual}")]
    MalformedLength { expected: usize, actual: usize },
}
