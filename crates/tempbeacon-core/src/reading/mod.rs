//! Reading codec.
//!
//! Same layered structure as any fixed binary record:
//! - `layout`: byte offsets, masks and limits (source of truth)
//! - `reader` / `writer`: bounds-checked big-endian access
//! - `temp_status`: the packed temperature/power field
//! - `checksum`: byte-sum negation
//! - `parser`: encode, decode, validate, describe
//!
//! Everything here is pure and allocation-free; sockets live in `transport`.
//!
//! Wire layout (8 bytes, network order):
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | timestamp (i32, seconds since epoch) |
//! | 4 | 2 | temp/status (bit 15 power, bits 0-14 tenths of a degree) |
//! | 6 | 1 | id |
//! | 7 | 1 | checksum |

pub mod checksum;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod temp_status;
pub mod writer;

pub use error::DecodeError;
pub use parser::{Reading, ReadingSummary, decode, describe, encode, validate};
pub use temp_status::{PowerStatus, TempStatus};
