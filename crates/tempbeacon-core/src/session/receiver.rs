use std::net::SocketAddr;

use tracing::{debug, warn};

use crate::reading::{DecodeError, Reading, decode, validate};
use crate::transport::{DatagramTransport, TransportError};

/// Receive buffer size. Larger than a reading so that oversized datagrams
/// surface as a length error instead of being silently truncated.
pub const RECEIVE_BUFFER_SIZE: usize = 512;

/// One datagram and its decode result.
#[derive(Debug)]
pub struct Received {
    pub source: SocketAddr,
    pub outcome: Result<Reading, DecodeError>,
}

pub struct Receiver<T> {
    transport: T,
}

impl<T: DatagramTransport> Receiver<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Block for one datagram and decode it.
    pub fn receive(&self) -> Result<Received, TransportError> {
        let mut buf = [0u8; RECEIVE_BUFFER_SIZE];
        let (len, source) = self.transport.recv_from(&mut buf)?;
        Ok(Received {
            source,
            outcome: decode(&buf[..len]),
        })
    }

    /// Block until a well-formed reading arrives. Malformed datagrams are
    /// logged and dropped; transport errors are returned.
    pub fn next_reading(&self) -> Result<(SocketAddr, Reading), TransportError> {
        loop {
            let Received { source, outcome } = self.receive()?;
            match outcome {
                Ok(reading) => {
                    if validate(&reading) {
                        debug!(%source, id = reading.id, "received reading");
                    } else {
                        warn!(
                            %source,
                            id = reading.id,
                            checksum = reading.checksum,
                            "checksum mismatch"
                        );
                    }
                    return Ok((source, reading));
                }
                Err(err) => {
                    warn!(%source, error = %err, "discarding malformed datagram");
                }
            }
        }
    }
}
