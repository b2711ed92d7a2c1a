//! Error types for the protocol layer.
//!
//! Each crate in Deskbot defines its own error enum. A `ProtocolError`
//! always means the bytes themselves are wrong (too many, too few, or of
//! the wrong kind) and never that the socket failed.

/// Errors that can occur while building or reading a frame.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A frame (or an append to a dynamic body) would exceed the maximum
    /// frame size for its direction.
    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// The size field was zero, so there is no room for the type byte.
    #[error("frame with empty size field (type 0x{type_id:02X})")]
    EmptyFrame { type_id: u8 },

    /// A body was reinterpreted as a record of another message type.
    #[error("type mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    TypeMismatch { expected: u8, actual: u8 },

    /// A body was reinterpreted as a record of a different size.
    #[error("size mismatch for type 0x{type_id:02X}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        type_id: u8,
        expected: usize,
        actual: usize,
    },
}
