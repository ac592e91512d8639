use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use tracing::debug;

use super::{DatagramTransport, TransportError};

/// [`DatagramTransport`] over a bound UDP socket.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    pub fn bind(addr: SocketAddr) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(addr)?;
        debug!(local = %socket.local_addr()?, "bound UDP socket");
        Ok(Self { socket })
    }

    /// Ephemeral socket of the same address family as `dest`.
    pub fn for_destination(dest: SocketAddr) -> Result<Self, TransportError> {
        let local = match dest {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        Self::bind(local)
    }

    /// Listen on every IPv4 interface.
    pub fn listen(port: u16) -> Result<Self, TransportError> {
        Self::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.socket.local_addr()?)
    }
}

impl DatagramTransport for UdpTransport {
    fn send_to(&self, payload: &[u8], dest: SocketAddr) -> Result<usize, TransportError> {
        Ok(self.socket.send_to(payload, dest)?)
    }

    fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), TransportError> {
        Ok(self.socket.recv_from(buf)?)
    }
}
