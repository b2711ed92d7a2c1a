//! Server → client frames.
//!
//! The transport reads every frame into one reusable [`InboundMessage`].
//! Reading a body as a fixed record goes through
//! [`as_fixed`](InboundMessage::as_fixed), which checks both the type and
//! the exact size before touching the bytes.

use crate::header::{HEADER_SIZE, Header};
use crate::stoc::StocId;
use crate::ProtocolError;

/// Largest inbound frame, header included.
pub const MAX_INBOUND_FRAME: usize = 1 << 14;

/// Largest inbound body.
pub const MAX_INBOUND_BODY: usize = MAX_INBOUND_FRAME - HEADER_SIZE;

/// A fixed-layout record the server sends.
pub trait InboundRecord: Sized {
    /// The message type this record arrives as.
    const ID: StocId;
    /// Exact body length in bytes.
    const SIZE: usize;

    /// Reads the record from `body` (`body.len() == SIZE`).
    fn read_body(body: &[u8]) -> Self;
}

/// The most recently read server frame.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    header: Header,
    body: Vec<u8>,
}

impl Default for InboundMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl InboundMessage {
    /// Creates an empty buffer sized for the largest inbound body.
    pub fn new() -> Self {
        Self {
            header: Header::new(0, 0),
            body: Vec::with_capacity(MAX_INBOUND_BODY),
        }
    }

    /// Builds a complete message from a type and body. Mostly for tests and
    /// for feeding recorded traffic through the dispatcher.
    ///
    /// # Errors
    /// Returns [`ProtocolError::FrameTooLarge`] if `body` exceeds
    /// [`MAX_INBOUND_BODY`].
    pub fn from_parts(type_id: u8, body: &[u8]) -> Result<Self, ProtocolError> {
        let mut msg = Self::new();
        msg.prepare(Header::new(check_body_len(body.len())?, type_id))
            .copy_from_slice(body);
        Ok(msg)
    }

    /// Resets the buffer for a new frame and returns the body slice to fill.
    ///
    /// The caller must have validated `header.body_size` against
    /// [`MAX_INBOUND_BODY`].
    pub fn prepare(&mut self, header: Header) -> &mut [u8] {
        self.header = header;
        self.body.clear();
        self.body.resize(usize::from(header.body_size), 0);
        &mut self.body
    }

    /// The current frame's header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// The raw type byte.
    pub fn type_id(&self) -> u8 {
        self.header.type_id
    }

    /// The known message type, if any.
    pub fn kind(&self) -> Option<StocId> {
        StocId::from_u8(self.header.type_id)
    }

    /// Body bytes (type byte excluded).
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body length in bytes.
    pub fn body_size(&self) -> usize {
        self.body.len()
    }

    /// Reinterprets the body as record `T`.
    ///
    /// # Errors
    /// - [`ProtocolError::TypeMismatch`]: the frame is not a `T::ID` message
    /// - [`ProtocolError::SizeMismatch`]: the body is not exactly `T::SIZE`
    pub fn as_fixed<T: InboundRecord>(&self) -> Result<T, ProtocolError> {
        let expected = T::ID as u8;
        if self.header.type_id != expected {
            return Err(ProtocolError::TypeMismatch {
                expected,
                actual: self.header.type_id,
            });
        }
        if self.body.len() != T::SIZE {
            return Err(ProtocolError::SizeMismatch {
                type_id: expected,
                expected: T::SIZE,
                actual: self.body.len(),
            });
        }
        Ok(T::read_body(&self.body))
    }
}

/// Checks a body length against the inbound limit.
///
/// # Errors
/// Returns [`ProtocolError::FrameTooLarge`] if it doesn't fit.
pub(crate) fn check_body_len(len: usize) -> Result<u16, ProtocolError> {
    if len > MAX_INBOUND_BODY {
        return Err(ProtocolError::FrameTooLarge {
            size: len + HEADER_SIZE,
            max: MAX_INBOUND_FRAME,
        });
    }
    Ok(len as u16)
}
