use std::time::Duration;

use deskbot_protocol::ProtocolError;

/// Errors that can occur in the transport layer.
///
/// Every variant is fatal to the session: a duel connection is not
/// resumable, so nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Resolving or connecting to the server failed.
    #[error("connect failed: {0}")]
    ConnectFailed(#[source] std::io::Error),

    /// The peer closed the connection.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// No data arrived within the configured read timeout.
    #[error("no data received for {0:?}")]
    TimedOut(Duration),

    /// The peer sent a frame that can't be framed (empty or oversized).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
