//! Lobby and duel message dispatch for Deskbot.
//!
//! This crate decides what the client says. It owns no socket:
//!
//! 1. **Opening**: [`Session::opening_messages`] introduces the player and
//!    asks to join or host a room
//! 2. **Lobby**: [`Session::handle`] answers rock-paper-scissors and turn
//!    order, takes the seat ([`Seat`]), submits the deck, says ready
//! 3. **Duel**: game messages go to the duel pump in `deskbot-duel`
//!
//! # How it fits in the stack
//!
//! ```text
//! Client loop (above)  ← reads frames, calls handle(), sends replies
//!     ↕
//! Session Layer (this crate)  ← decides replies, tracks seat and duel
//!     ↕
//! Protocol + Duel Layers (below)  ← records, board shadow, engine
//! ```

mod config;
mod error;
mod seat;
mod session;

pub use config::{HostOptions, RoomChoice, SessionConfig, TurnOrder};
pub use error::SessionError;
pub use seat::{MAX_SEAT, Seat};
pub use session::{Flow, Session, StopReason};
