//! The codec seam between raw duel payloads and [`DuelMessage`]s.

use crate::{Answer, Controller, DuelError, DuelMessage, Location, Place, Request};

/// Board knowledge the codec may need while decoding special messages or
/// encoding answers.
///
/// The board shadow is the only implementation in this crate; tests may
/// supply their own.
pub trait EncodeContext {
    /// Number of cards currently in a pile.
    fn pile_size(&self, controller: Controller, location: Location) -> usize;

    /// The reason recorded by the last match-ending message, or `0`.
    fn match_win_reason(&self) -> u32;

    /// Whether the card in `place`'s zone has any materials attached.
    fn has_material(&self, place: &Place) -> bool;

    /// Where the material that left `left` came from.
    ///
    /// # Errors
    /// [`DuelError::MissingLeftTarget`] if nothing was recorded for `left`.
    fn resolve_left_target(&self, left: &Place) -> Result<Place, DuelError>;

    fn set_match_win_reason(&mut self, reason: u32);

    /// Remembers that `left` was vacated by the material now at `from`.
    fn record_left_target(&mut self, left: Place, from: Place);

    /// Queues a material place to be reported later, in arrival order.
    fn defer_material(&mut self, place: Place);

    /// Returns every deferred material place and forgets them. A second
    /// call with nothing deferred in between returns an empty list.
    fn take_deferred_materials(&mut self) -> Vec<Place>;
}

/// Outcome of looking at the front of a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStatus {
    /// A complete message.
    Ok(DuelMessage),
    /// A message that needs board context; run
    /// [`DuelCodec::decode_special`] on the same bytes.
    Special,
    /// Nothing this codec understands. The rest of the payload can't be
    /// split into messages.
    Unknown,
    /// The message's framing runs past the end of the input. `bytes_read`
    /// holds the size the framing claims.
    Truncated,
}

/// The result of [`DuelCodec::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub status: DecodeStatus,
    /// Bytes of the input the message occupies. Ignored for
    /// [`DecodeStatus::Unknown`].
    pub bytes_read: usize,
}

/// Turns duel payloads into messages and answers into response bytes.
pub trait DuelCodec: Send {
    /// Decodes the message at the front of `data`.
    fn decode(&self, data: &[u8]) -> Decoded;

    /// Decodes a message previously reported as [`DecodeStatus::Special`].
    /// `data` is exactly the bytes `decode` said it occupies.
    fn decode_special(
        &self,
        ctx: &mut dyn EncodeContext,
        data: &[u8],
    ) -> Result<DuelMessage, DuelError>;

    /// Encodes an engine's answer to `request`.
    fn encode_answer(
        &self,
        ctx: &dyn EncodeContext,
        request: &Request,
        answer: &Answer,
    ) -> Result<Vec<u8>, DuelError>;
}
