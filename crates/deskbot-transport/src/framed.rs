//! Header/body framing over any async byte stream.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use deskbot_protocol::{
    HEADER_SIZE, Header, InboundMessage, MAX_INBOUND_BODY, MAX_INBOUND_FRAME, OutboundMessage,
    ProtocolError,
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::{ConnectionId, SendQueue, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Transport settings.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Give up on a read that produces no frame for this long.
    /// `None` waits forever.
    pub read_timeout: Option<Duration>,
}

/// Where the reader is within the current frame.
#[derive(Debug, Clone, Copy)]
enum ReadState {
    AwaitingHeader,
    AwaitingBody(Header),
}

/// One framed connection to the duel server.
///
/// Reads are strictly header-then-body and writes drain a FIFO one frame at
/// a time. Both take `&mut self`, so two reads or two writes can never be
/// in flight together.
pub struct FramedTransport<S> {
    id: ConnectionId,
    stream: S,
    incoming: InboundMessage,
    outgoing: SendQueue,
    config: TransportConfig,
}

impl FramedTransport<TcpStream> {
    /// Connects to the server at `addr` (`host:port`).
    pub async fn connect(addr: &str, config: TransportConfig) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(TransportError::ConnectFailed)?;
        stream.set_nodelay(true).map_err(TransportError::ConnectFailed)?;
        let transport = Self::new(stream, config);
        tracing::info!(id = %transport.id, addr, "connected to duel server");
        Ok(transport)
    }
}

impl<S> FramedTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps an already connected stream.
    pub fn new(stream: S, config: TransportConfig) -> Self {
        Self {
            id: ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed)),
            stream,
            incoming: InboundMessage::new(),
            outgoing: SendQueue::new(),
            config,
        }
    }

    /// Returns the unique identifier for this connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Reads the next complete frame.
    ///
    /// The returned message lives in a buffer that the next call reuses.
    ///
    /// # Errors
    /// - [`TransportError::ConnectionClosed`]: EOF, before or mid-frame
    /// - [`TransportError::ReceiveFailed`]: any other I/O error
    /// - [`TransportError::TimedOut`]: the configured read timeout elapsed
    /// - [`TransportError::Protocol`]: zero size field or oversized body
    pub async fn read_message(&mut self) -> Result<&InboundMessage, TransportError> {
        let timeout = self.config.read_timeout;
        let mut state = ReadState::AwaitingHeader;
        loop {
            state = match state {
                ReadState::AwaitingHeader => {
                    let mut raw = [0u8; HEADER_SIZE];
                    read_exact_within(&mut self.stream, &mut raw, timeout).await?;
                    let header = Header::decode(raw);
                    check_header(&header)?;
                    ReadState::AwaitingBody(header)
                }
                ReadState::AwaitingBody(header) => {
                    let body = self.incoming.prepare(header);
                    read_exact_within(&mut self.stream, body, timeout).await?;
                    tracing::trace!(
                        id = %self.id,
                        type_id = header.type_id,
                        size = header.body_size,
                        "frame received"
                    );
                    return Ok(&self.incoming);
                }
            };
        }
    }

    /// Queues a message behind any that are already waiting.
    pub fn enqueue(&mut self, msg: OutboundMessage) {
        self.outgoing.push(msg);
    }

    /// Number of messages queued but not yet written.
    pub fn pending(&self) -> usize {
        self.outgoing.len()
    }

    /// Writes every queued message, oldest first.
    ///
    /// Each frame goes out as one `write_all`, and is popped only after
    /// that write completes.
    ///
    /// # Errors
    /// Returns [`TransportError::SendFailed`] on the first failed write; the
    /// failed message and everything behind it stay queued.
    pub async fn flush(&mut self) -> Result<(), TransportError> {
        while let Some(msg) = self.outgoing.front() {
            self.stream
                .write_all(msg.as_bytes())
                .await
                .map_err(TransportError::SendFailed)?;
            tracing::trace!(
                id = %self.id,
                type_id = msg.type_id(),
                size = msg.body_size(),
                "frame sent"
            );
            self.outgoing.pop();
        }
        self.stream.flush().await.map_err(TransportError::SendFailed)
    }

    /// Queues `msg` and writes everything pending.
    pub async fn send(&mut self, msg: OutboundMessage) -> Result<(), TransportError> {
        self.enqueue(msg);
        self.flush().await
    }

    /// Shuts down the write half of the stream.
    pub async fn shutdown(&mut self) -> Result<(), TransportError> {
        self.stream
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }

    /// Consumes the transport and returns the stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

fn check_header(header: &Header) -> Result<(), ProtocolError> {
    if !header.is_well_formed() {
        return Err(ProtocolError::EmptyFrame {
            type_id: header.type_id,
        });
    }
    let body = usize::from(header.body_size);
    if body > MAX_INBOUND_BODY {
        return Err(ProtocolError::FrameTooLarge {
            size: body + HEADER_SIZE,
            max: MAX_INBOUND_FRAME,
        });
    }
    Ok(())
}

async fn read_exact_within<R>(
    reader: &mut R,
    buf: &mut [u8],
    timeout: Option<Duration>,
) -> Result<(), TransportError>
where
    R: AsyncRead + Unpin,
{
    let read = reader.read_exact(buf);
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, read)
            .await
            .map_err(|_| TransportError::TimedOut(limit))?,
        None => read.await,
    };
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(
            TransportError::ConnectionClosed("server closed the stream".into()),
        ),
        Err(e) => Err(TransportError::ReceiveFailed(e)),
    }
}
