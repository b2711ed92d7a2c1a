//! Client → server frames.
//!
//! Two ways to build one:
//!
//! - [`OutboundMessage::fixed`] copies a fixed-layout record (an
//!   [`OutboundRecord`]) into the body in one go.
//! - [`OutboundMessage::begin_dynamic`] opens an empty body that grows with
//!   [`append`](OutboundMessage::append) /
//!   [`append_bytes`](OutboundMessage::append_bytes). The size field is
//!   rewritten after every append, so it always matches the bytes written.

use crate::ctos::CtosId;
use crate::header::{HEADER_SIZE, Header};
use crate::ProtocolError;

/// Largest outbound frame, header included.
pub const MAX_OUTBOUND_FRAME: usize = 1 << 10;

/// Largest outbound body.
pub const MAX_OUTBOUND_BODY: usize = MAX_OUTBOUND_FRAME - HEADER_SIZE;

/// A fixed-layout record the client sends.
///
/// `SIZE` is the exact body length; `write_body` receives a zeroed slice of
/// that length, so padding bytes stay zero.
pub trait OutboundRecord {
    /// The message type this record is sent as.
    const ID: CtosId;
    /// Body length in bytes.
    const SIZE: usize;

    /// Writes the record's fields into `body` (`body.len() == SIZE`).
    fn write_body(&self, body: &mut [u8]);
}

/// A scalar that can be appended to a dynamic body in little-endian order.
pub trait WireValue: Copy {
    /// Appends `self` to `out`.
    fn put(self, out: &mut Vec<u8>);
    /// Encoded width in bytes.
    fn width() -> usize;
}

macro_rules! wire_value {
    ($($ty:ty),*) => {
        $(
            impl WireValue for $ty {
                fn put(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                fn width() -> usize {
                    std::mem::size_of::<$ty>()
                }
            }
        )*
    };
}

wire_value!(u8, u16, u32, u64, i8, i16, i32, i64);

/// A complete outbound frame: header followed by body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    bytes: Vec<u8>,
}

impl OutboundMessage {
    /// Builds a frame from a fixed record.
    ///
    /// A record that cannot fit in an outbound frame fails to compile.
    pub fn fixed<T: OutboundRecord>(record: &T) -> Self {
        const { assert!(T::SIZE <= MAX_OUTBOUND_BODY) };
        let mut bytes = vec![0u8; HEADER_SIZE + T::SIZE];
        record.write_body(&mut bytes[HEADER_SIZE..]);
        let mut msg = Self { bytes };
        msg.write_header(T::ID as u8);
        msg
    }

    /// Opens a frame with an empty, growable body.
    pub fn begin_dynamic(id: CtosId) -> Self {
        let mut bytes = Vec::with_capacity(64);
        bytes.resize(HEADER_SIZE, 0);
        let mut msg = Self { bytes };
        msg.write_header(id as u8);
        msg
    }

    /// Appends raw bytes to the body.
    ///
    /// # Errors
    /// Returns [`ProtocolError::FrameTooLarge`] if the body would exceed
    /// [`MAX_OUTBOUND_BODY`]. The message is left unchanged.
    pub fn append_bytes(&mut self, data: &[u8]) -> Result<&mut Self, ProtocolError> {
        self.check_room(data.len())?;
        self.bytes.extend_from_slice(data);
        self.write_header(self.type_id());
        Ok(self)
    }

    /// Appends one little-endian scalar to the body.
    ///
    /// # Errors
    /// Same as [`append_bytes`](Self::append_bytes).
    pub fn append<T: WireValue>(&mut self, value: T) -> Result<&mut Self, ProtocolError> {
        self.check_room(T::width())?;
        value.put(&mut self.bytes);
        self.write_header(self.type_id());
        Ok(self)
    }

    /// Body bytes written so far (type byte excluded).
    pub fn body_size(&self) -> usize {
        self.bytes.len() - HEADER_SIZE
    }

    /// The decoded header as it currently sits in the buffer.
    pub fn header(&self) -> Header {
        Header::decode([self.bytes[0], self.bytes[1], self.bytes[2]])
    }

    /// The message type byte.
    pub fn type_id(&self) -> u8 {
        self.bytes[2]
    }

    /// The body only.
    pub fn body(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..]
    }

    /// The full frame, ready to be written to the socket.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total frame length, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: a frame has at least a header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn check_room(&self, extra: usize) -> Result<(), ProtocolError> {
        let size = self.body_size() + extra;
        if size > MAX_OUTBOUND_BODY {
            return Err(ProtocolError::FrameTooLarge {
                size: size + HEADER_SIZE,
                max: MAX_OUTBOUND_FRAME,
            });
        }
        Ok(())
    }

    fn write_header(&mut self, type_id: u8) {
        // body_size() <= MAX_OUTBOUND_BODY, which fits a u16 with room for
        // the type byte.
        let header = Header::new(self.body_size() as u16, type_id);
        self.bytes[..HEADER_SIZE].copy_from_slice(&header.encode());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        a: u8,
        b: u32,
    }

    impl OutboundRecord for Pair {
        const ID: CtosId = CtosId::Chat;
        const SIZE: usize = 8;

        fn write_body(&self, body: &mut [u8]) {
            body[0] = self.a;
            body[4..8].copy_from_slice(&self.b.to_le_bytes());
        }
    }

    #[test]
    fn test_fixed_header_counts_record_and_type_byte() {
        let msg = OutboundMessage::fixed(&Pair { a: 7, b: 0x0102_0304 });
        assert_eq!(msg.as_bytes(), &[9, 0, CtosId::Chat as u8, 7, 0, 0, 0, 4, 3, 2, 1]);
        assert_eq!(msg.body_size(), 8);
        assert_eq!(msg.header().wire_size(), 9);
    }

    #[test]
    fn test_dynamic_body_growth_three_u32() {
        let mut msg = OutboundMessage::begin_dynamic(CtosId::UpdateDeck);
        assert_eq!(msg.body_size(), 0);
        assert_eq!(msg.header().wire_size(), 1);

        msg.append(1u32).unwrap();
        assert_eq!(msg.body_size(), 4);
        msg.append(2u32).unwrap().append(3u32).unwrap();

        assert_eq!(msg.body_size(), 12);
        assert_eq!(msg.header().body_size, 12);
        // The type byte is counted once, not once per append.
        assert_eq!(msg.header().wire_size(), 13);
        assert_eq!(msg.len(), 15);
    }

    #[test]
    fn test_append_bytes_tracks_size() {
        let mut msg = OutboundMessage::begin_dynamic(CtosId::Response);
        msg.append_bytes(&[1, 2, 3]).unwrap();
        msg.append(0xFFu8).unwrap();
        assert_eq!(msg.body(), &[1, 2, 3, 0xFF]);
        assert_eq!(msg.as_bytes()[..2], [5, 0]);
    }

    #[test]
    fn test_append_past_frame_limit_fails_and_keeps_message() {
        let mut msg = OutboundMessage::begin_dynamic(CtosId::Response);
        msg.append_bytes(&vec![0u8; MAX_OUTBOUND_BODY - 2]).unwrap();
        let before = msg.clone();

        let err = msg.append(0u32).unwrap_err();
        assert!(matches!(err, ProtocolError::FrameTooLarge { max: MAX_OUTBOUND_FRAME, .. }));
        assert_eq!(msg, before);

        // Exactly filling the body is fine.
        msg.append(0u16).unwrap();
        assert_eq!(msg.len(), MAX_OUTBOUND_FRAME);
    }
}
