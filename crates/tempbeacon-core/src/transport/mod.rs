//! Datagram transport for readings.
//!
//! The codec never touches sockets; emitters and receivers hand it raw byte
//! buffers obtained through a [`DatagramTransport`].

mod udp;

pub use udp::UdpTransport;

use std::net::{SocketAddr, ToSocketAddrs};

use thiserror::Error;

/// Fire-and-forget datagram I/O: no handshake, no acknowledgement.
pub trait DatagramTransport {
    fn send_to(&self, payload: &[u8], dest: SocketAddr) -> Result<usize, TransportError>;
    fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), TransportError>;
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to resolve {host}:{port}: {reason}")]
    AddressResolution {
        host: String,
        port: u16,
        reason: String,
    },
    #[error("socket error: {0}")]
    Socket(#[from] std::io::Error),
}

/// Resolve `host:port` to the first address the system resolver returns.
///
/// # Examples
/// ```
/// use tempbeacon_core::resolve;
///
/// let addr = resolve("127.0.0.1", 5000)?;
/// assert_eq!(addr.port(), 5000);
/// # Ok::<(), tempbeacon_core::TransportError>(())
/// ```
pub fn resolve(host: &str, port: u16) -> Result<SocketAddr, TransportError> {
    let resolution_error = |reason: String| TransportError::AddressResolution {
        host: host.to_string(),
        port,
        reason,
    };
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|err| resolution_error(err.to_string()))?;
    addrs
        .next()
        .ok_or_else(|| resolution_error("no addresses returned".to_string()))
}
