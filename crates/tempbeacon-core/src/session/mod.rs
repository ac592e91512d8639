//! Emitter and receiver loops built on the codec and a transport.
//!
//! Both sides are single-threaded and synchronous. The only state carried
//! across packets is the emitter's sequence id.

mod emitter;
mod receiver;

#[cfg(test)]
pub(crate) mod mock;

pub use emitter::{EmitterSession, unix_timestamp_now};
pub use receiver::{RECEIVE_BUFFER_SIZE, Received, Receiver};
