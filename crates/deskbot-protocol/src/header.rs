//! The 3-byte frame header shared by both directions.

use std::fmt;

/// Bytes in a frame header: `u16` size + `u8` type.
pub const HEADER_SIZE: usize = 3;

/// A decoded frame header.
///
/// On the wire the size field counts the type byte too, so a frame with a
/// 4-byte body carries `5` in its size field. `Header` stores the body size
/// and adds the type byte back only when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Body bytes following the header (type byte excluded).
    pub body_size: u16,
    /// Message type tag.
    pub type_id: u8,
    /// `false` when the wire size field was zero (no room for the type byte).
    well_formed: bool,
}

impl Header {
    /// Creates a header for a body of `body_size` bytes.
    ///
    /// `body_size` must leave room for the type byte in a `u16`.
    pub fn new(body_size: u16, type_id: u8) -> Self {
        debug_assert!(body_size < u16::MAX);
        Self {
            body_size,
            type_id,
            well_formed: true,
        }
    }

    /// Decodes a header from exactly [`HEADER_SIZE`] bytes.
    ///
    /// Never fails: a zero size field decodes to an empty body and is
    /// reported by [`is_well_formed`](Self::is_well_formed).
    pub fn decode(bytes: [u8; HEADER_SIZE]) -> Self {
        let size = u16::from_le_bytes([bytes[0], bytes[1]]);
        Self {
            body_size: size.saturating_sub(1),
            type_id: bytes[2],
            well_formed: size != 0,
        }
    }

    /// Encodes this header into its wire form.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let size = self.wire_size().to_le_bytes();
        [size[0], size[1], self.type_id]
    }

    /// The value carried in the wire size field (body plus type byte).
    pub fn wire_size(&self) -> u16 {
        self.body_size + 1
    }

    /// Returns `false` if the size field could not account for the type byte.
    pub fn is_well_formed(&self) -> bool {
        self.well_formed
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type 0x{:02X}, {} body bytes", self.type_id, self.body_size)
    }
}
