//! Error types for the duel layer.

use deskbot_protocol::ProtocolError;

use crate::Place;

/// Errors that can occur while replaying or answering duel messages.
#[derive(Debug, thiserror::Error)]
pub enum DuelError {
    /// An overlay material left `place` but no origin was recorded for it.
    /// The codec asked for something it never stored.
    #[error("no left target recorded for {0}")]
    MissingLeftTarget(Place),

    /// The decoder's byte accounting disagrees with the payload size, so
    /// message boundaries can no longer be trusted.
    #[error("duel stream desynchronized: consumed {consumed} of {expected} bytes")]
    Desync { consumed: usize, expected: usize },

    /// The codec could not encode an answer or special message.
    #[error("codec failed: {0}")]
    Codec(String),

    /// The encoded answer didn't fit in a response frame.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
