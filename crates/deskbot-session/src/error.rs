//! Error types for the session layer.

use deskbot_duel::DuelError;
use deskbot_protocol::ProtocolError;

/// Faults that end the session.
///
/// Orderly endings (server error, room full, duel over) are not errors;
/// they come back as [`Flow::Stop`](crate::Flow::Stop).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A message we built doesn't fit in an outbound frame, e.g. a deck
    /// too large to submit.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The duel stream can no longer be split reliably.
    #[error(transparent)]
    Duel(#[from] DuelError),
}
