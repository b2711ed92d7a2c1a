//! Unified error type for the Deskbot client.

use std::path::PathBuf;

use deskbot_session::SessionError;
use deskbot_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` variants let `?` lift sub-crate errors. Protocol and duel
/// errors arrive wrapped in one of them. The rest cover loading the files
/// the client starts from.
#[derive(Debug, thiserror::Error)]
pub enum DeskbotError {
    /// Connecting, reading, or writing failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The dispatcher gave up on the session.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The config file couldn't be parsed.
    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// The deck list couldn't be parsed.
    #[error("invalid deck {}, line {line}: {reason}", path.display())]
    Deck {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A file couldn't be read at all.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskbot_duel::DuelError;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let deskbot_err: DeskbotError = err.into();
        assert!(matches!(deskbot_err, DeskbotError::Transport(_)));
        assert!(deskbot_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::Duel(DuelError::Desync {
            consumed: 3,
            expected: 4,
        });
        let deskbot_err: DeskbotError = err.into();
        assert!(matches!(deskbot_err, DeskbotError::Session(_)));
        assert!(deskbot_err.to_string().contains("3 of 4"));
    }

    #[test]
    fn test_frame_errors_arrive_through_transport() {
        let err = TransportError::Protocol(deskbot_protocol::ProtocolError::EmptyFrame {
            type_id: 0x12,
        });
        let deskbot_err: DeskbotError = err.into();
        assert!(matches!(
            deskbot_err,
            DeskbotError::Transport(TransportError::Protocol(_))
        ));
    }

    #[test]
    fn test_deck_error_names_file_and_line() {
        let err = DeskbotError::Deck {
            path: PathBuf::from("decks/a.ydk"),
            line: 7,
            reason: "code out of range".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid deck decks/a.ydk, line 7: code out of range"
        );
    }
}
