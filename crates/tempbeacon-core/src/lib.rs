//! tempbeacon core library: a fixed-layout UDP temperature beacon.
//!
//! An emitter packs a timestamp, a temperature and a power-source flag into
//! an 8-byte, network-order packet with a one-byte checksum, and sends it as a
//! single datagram. A receiver decodes each datagram, checks the checksum and
//! hands display-ready fields to its presenter.
//!
//! The codec (`reading`) is pure and byte-oriented. Socket I/O is isolated in
//! `transport`; the loops that tie them together live in `session`.
//!
//! Invariants:
//! - A reading serializes to exactly 8 bytes, independent of host layout.
//! - A packet is valid iff the byte-sum of all 8 bytes is zero modulo 256.
//! - Encoding never fails; temperatures are clamped to 20.0–120.0 degrees.
//!
//! # Examples
//! ```
//! use tempbeacon_core::{PowerStatus, decode, describe, encode, validate};
//!
//! let bytes = encode(1_700_000_000, 215, PowerStatus::Battery, 7);
//! let reading = decode(&bytes)?;
//! assert!(validate(&reading));
//! assert_eq!(describe(&reading).temperature_label(), "21.5");
//! # Ok::<(), tempbeacon_core::DecodeError>(())
//! ```

mod reading;
mod sensor;
mod session;
mod transport;

pub use reading::layout::{READING_SIZE, TEMP_MAX_TENTHS, TEMP_MIN_TENTHS};
pub use reading::{
    DecodeError, PowerStatus, Reading, ReadingSummary, TempStatus, decode, describe, encode,
    validate,
};
pub use sensor::{FixedSensor, SimulatedSensor, TemperatureSource};
pub use session::{
    EmitterSession, RECEIVE_BUFFER_SIZE, Received, Receiver, unix_timestamp_now,
};
pub use transport::{DatagramTransport, TransportError, UdpTransport, resolve};
