//! The duel half of Deskbot.
//!
//! Once the duel starts, every game message the server sends carries a batch
//! of duel-core messages. [`DuelState::pump`] splits that batch through a
//! [`DuelCodec`], replays each message into the [`BoardShadow`], shows it to
//! the [`DecisionEngine`], and turns the engine's answers back into
//! Response frames.
//!
//! The codec and engine are traits: this crate ships [`RawCoreCodec`] and
//! [`PassiveEngine`] as minimal implementations.

mod codec;
mod engine;
mod error;
mod message;
mod place;
mod pump;
mod raw;
mod shadow;

pub use codec::{DecodeStatus, Decoded, DuelCodec, EncodeContext};
pub use engine::{
    DecisionEngine, EngineFactory, PassiveEngine, PassiveEngineFactory, TurnPreference,
};
pub use error::DuelError;
pub use message::{
    Answer, CardCode, DuelEvent, DuelMessage, MessageKind, Query, QueryData, Request, RequestKind,
};
pub use place::{Controller, Location, Place};
pub use pump::{DuelState, PumpReport};
pub use raw::RawCoreCodec;
pub use shadow::{BoardShadow, Zone};
