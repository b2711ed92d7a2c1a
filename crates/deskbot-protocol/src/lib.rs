//! Wire protocol for Deskbot.
//!
//! This crate defines the envelopes that travel between the duel server and
//! the client:
//!
//! - **Header** ([`Header`]): the 3-byte prefix on every frame, a
//!   little-endian `u16` size (which counts the type byte) and a `u8` type.
//! - **Outbound** ([`OutboundMessage`]): client → server frames, built
//!   either from a fixed record or by appending to a growable body.
//! - **Inbound** ([`InboundMessage`]): the reusable server → client buffer,
//!   with checked reinterpretation into fixed records.
//! - **Records** ([`ctos`], [`stoc`]): the fixed-layout bodies and their
//!   type ids.
//! - **Errors** ([`ProtocolError`]): what can go wrong while building or
//!   reading a frame.
//!
//! # Architecture
//!
//! The protocol layer doesn't know about sockets or sessions. It only knows
//! how bytes are laid out.
//!
//! ```text
//! Transport (bytes) → Protocol (frames) → Session (reactions)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

pub mod ctos;
mod error;
mod header;
mod inbound;
mod le;
mod outbound;
pub mod stoc;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::ProtocolError;
pub use header::{Header, HEADER_SIZE};
pub use inbound::{InboundMessage, InboundRecord, MAX_INBOUND_BODY, MAX_INBOUND_FRAME};
pub use outbound::{
    MAX_OUTBOUND_BODY, MAX_OUTBOUND_FRAME, OutboundMessage, OutboundRecord, WireValue,
};
pub use types::{
    CLIENT_VERSION, ClientVersion, HANDSHAKE, HostInfo, NAME_MAX_LENGTH, NOTES_MAX_LENGTH,
    Version, encode_name, encode_notes, split_flags,
};
