//! Framed transport for Deskbot.
//!
//! Turns one bidirectional byte stream into whole frames and back:
//!
//! - **Reading**: [`FramedTransport::read_message`] reads exactly one
//!   header, then exactly the body it declares, into a reusable buffer.
//! - **Writing**: [`FramedTransport::enqueue`] appends to a FIFO
//!   ([`SendQueue`]); [`FramedTransport::flush`] writes the queue out one
//!   frame at a time, in order.
//!
//! The transport is generic over `AsyncRead + AsyncWrite`, so tests drive it
//! with `tokio::io::duplex` and the binary drives it with a `TcpStream`.

mod error;
mod framed;
mod queue;

pub use error::TransportError;
pub use framed::{FramedTransport, TransportConfig};
pub use queue::SendQueue;

use std::fmt;

/// Opaque identifier for a connection, used to tell sessions apart in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}
