use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::net::SocketAddr;

use crate::transport::{DatagramTransport, TransportError};

/// In-memory transport: records sends and replays queued datagrams.
#[derive(Default)]
pub struct MockTransport {
    pub sent: RefCell<Vec<(Vec<u8>, SocketAddr)>>,
    pub incoming: RefCell<VecDeque<(Vec<u8>, SocketAddr)>>,
    pub fail_sends: bool,
}

impl MockTransport {
    pub fn with_incoming(datagrams: Vec<(Vec<u8>, SocketAddr)>) -> Self {
        Self {
            incoming: RefCell::new(datagrams.into()),
            ..Self::default()
        }
    }
}

impl DatagramTransport for MockTransport {
    fn send_to(&self, payload: &[u8], dest: SocketAddr) -> Result<usize, TransportError> {
        if self.fail_sends {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused").into());
        }
        self.sent.borrow_mut().push((payload.to_vec(), dest));
        Ok(payload.len())
    }

    fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), TransportError> {
        let (data, source) = self
            .incoming
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more datagrams"))?;
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        Ok((len, source))
    }
}
