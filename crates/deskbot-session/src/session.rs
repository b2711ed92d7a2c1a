//! The message dispatcher.
//!
//! A [`Session`] is the client's side of one room: it knows who we are,
//! where we sit, and (once the duel starts) owns the duel state. It never
//! touches the socket. The caller reads a frame, hands it to
//! [`Session::handle`], and sends whatever the session pushed onto `out`:
//!
//! ```text
//!   transport ──read──→ Session::handle ──out──→ transport (enqueue, flush)
//!                            │
//!                            └─ GameMsg ──→ DuelState::pump
//! ```
//!
//! The lobby exchange is a fixed script: introduce ourselves, join or host,
//! take the seat the server gives us, submit the deck, say ready. Every
//! reply is decided from the incoming message alone plus a little state
//! recorded along the way (team-0 size, seat, the duel).

use std::fmt;

use deskbot_duel::{DuelCodec, DuelError, DuelState, EngineFactory, TurnPreference};
use deskbot_protocol::ctos::{self, CreateGame, JoinGame, PlayerInfo, Ready, TryStart};
use deskbot_protocol::stoc::{self, StocId};
use deskbot_protocol::{
    CLIENT_VERSION, InboundMessage, InboundRecord, OutboundMessage, encode_name, encode_notes,
};

use crate::{RoomChoice, Seat, SessionConfig, SessionError, TurnOrder};

/// `version2` field of the join request.
const JOIN_VERSION2: u16 = 0;

/// The rock-paper-scissors hand we always throw.
const RPS_HAND: u8 = 1;

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// Why the session ended on its own terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The server rejected something we sent.
    ServerError { msg: u8, code: u32 },
    /// The server rejected our deck.
    DeckError { error_type: u32, code: u32 },
    /// The server seated us past the last seat.
    RoomFull { seat: u8 },
    /// All duels are over.
    DuelEnded,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServerError { msg, code } => {
                write!(f, "server reported error 0x{msg:X} with code {code}")
            }
            Self::DeckError { error_type, code } => {
                write!(f, "deck error 0x{error_type:X} with code {code}")
            }
            Self::RoomFull { seat } => write!(f, "room is full (seat {seat})"),
            Self::DuelEnded => write!(f, "all duels ended"),
        }
    }
}

/// What the caller should do after a message has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Send what was queued and read the next message.
    Continue,
    /// Send what was queued, then close.
    Stop(StopReason),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One client in one room.
pub struct Session {
    config: SessionConfig,
    codec: Box<dyn DuelCodec>,
    factory: Box<dyn EngineFactory>,
    script: String,
    deck: Option<Vec<u32>>,

    /// Size of team 0, from the server's join acknowledgement.
    t0_count: i32,
    seat: Option<Seat>,
    duel: Option<DuelState>,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        codec: Box<dyn DuelCodec>,
        factory: Box<dyn EngineFactory>,
    ) -> Self {
        Self {
            config,
            codec,
            factory,
            script: String::new(),
            deck: None,
            t0_count: 0,
            seat: None,
            duel: None,
        }
    }

    /// Sets the main deck submitted after every seat change.
    pub fn with_deck(mut self, deck: Vec<u32>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Sets the script source handed to the engine factory at duel start.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn seat(&self) -> Option<Seat> {
        self.seat
    }

    pub fn t0_count(&self) -> i32 {
        self.t0_count
    }

    pub fn duel(&self) -> Option<&DuelState> {
        self.duel.as_ref()
    }

    /// The messages that open the conversation: our name, then the room
    /// request.
    pub fn opening_messages(&self) -> Vec<OutboundMessage> {
        let player = PlayerInfo {
            name: encode_name(&self.config.player_name),
        };
        let room = match &self.config.room {
            RoomChoice::Host(options) => OutboundMessage::fixed(&CreateGame {
                host_info: options.host_info,
                name: encode_name(&options.name),
                pass: encode_name(&options.password),
                notes: encode_notes(&options.notes),
            }),
            RoomChoice::Join { id, password } => OutboundMessage::fixed(&JoinGame {
                version2: JOIN_VERSION2,
                id: *id,
                pass: encode_name(password),
                version: CLIENT_VERSION,
            }),
        };
        vec![OutboundMessage::fixed(&player), room]
    }

    /// Handles one inbound message, pushing any replies onto `out` in the
    /// order they must be sent.
    ///
    /// A message whose body doesn't match its declared type is logged and
    /// skipped.
    ///
    /// # Errors
    /// - [`SessionError::Protocol`] if a reply doesn't fit in a frame
    /// - [`SessionError::Duel`] on a duel stream desync when
    ///   `stop_on_desync` is set
    pub fn handle(
        &mut self,
        msg: &InboundMessage,
        out: &mut Vec<OutboundMessage>,
    ) -> Result<Flow, SessionError> {
        let Some(kind) = msg.kind() else {
            tracing::warn!(
                type_id = msg.type_id(),
                size = msg.body_size(),
                "unknown message ignored"
            );
            return Ok(Flow::Continue);
        };
        tracing::debug!(?kind, size = msg.body_size(), "message received");

        match kind {
            StocId::GameMsg => self.on_game_msg(msg.body(), out),
            StocId::ErrorMsg => Ok(self.on_error(msg)),
            StocId::ChooseRps => {
                out.push(OutboundMessage::fixed(&ctos::RpsChoice { value: RPS_HAND }));
                Ok(Flow::Continue)
            }
            StocId::ChooseOrder => {
                let go_first = self.choose_first_turn();
                tracing::info!(go_first, "choosing turn order");
                out.push(OutboundMessage::fixed(&ctos::TurnChoice {
                    value: u8::from(go_first),
                }));
                Ok(Flow::Continue)
            }
            StocId::JoinGame => {
                if let Some(ack) = read::<stoc::JoinGame>(msg) {
                    self.t0_count = ack.host_info.t0_count;
                    tracing::info!(t0_count = self.t0_count, "joined room");
                }
                Ok(Flow::Continue)
            }
            StocId::TypeChange => match read::<stoc::TypeChange>(msg) {
                Some(change) => self.on_type_change(change, out),
                None => Ok(Flow::Continue),
            },
            StocId::DuelStart => {
                let engine = self.factory.create(&self.script);
                self.duel = Some(DuelState::new(engine));
                tracing::info!("duel started");
                Ok(Flow::Continue)
            }
            StocId::DuelEnd => {
                self.duel = None;
                tracing::info!("all duels ended");
                Ok(Flow::Stop(StopReason::DuelEnded))
            }
            StocId::PlayerChange => {
                if let Some(change) = read::<stoc::PlayerChange>(msg) {
                    if change.is_ready() && self.config.room.is_host() {
                        tracing::info!(seat = change.seat(), "opponent ready, starting");
                        out.push(OutboundMessage::fixed(&TryStart));
                    }
                }
                Ok(Flow::Continue)
            }
            StocId::Rematch => {
                out.push(OutboundMessage::fixed(&ctos::Rematch { value: 1 }));
                Ok(Flow::Continue)
            }
            other => {
                tracing::debug!(kind = ?other, "message ignored");
                Ok(Flow::Continue)
            }
        }
    }

    fn on_error(&self, msg: &InboundMessage) -> Flow {
        let size = msg.body_size();
        let reason = if size == stoc::ErrorMsg::SIZE {
            read::<stoc::ErrorMsg>(msg).map(|e| StopReason::ServerError {
                msg: e.msg,
                code: e.code,
            })
        } else if size == stoc::DeckError::SIZE {
            read::<stoc::DeckError>(msg).map(|e| StopReason::DeckError {
                error_type: e.error_type,
                code: e.code,
            })
        } else {
            tracing::warn!(size, "error message of unknown shape ignored");
            None
        };
        match reason {
            Some(reason) => {
                tracing::error!(%reason, "server refused");
                Flow::Stop(reason)
            }
            None => Flow::Continue,
        }
    }

    fn on_type_change(
        &mut self,
        change: stoc::TypeChange,
        out: &mut Vec<OutboundMessage>,
    ) -> Result<Flow, SessionError> {
        let Some(seat) = Seat::derive(change, self.t0_count) else {
            let seat = change.seat();
            tracing::error!(seat, "room is full, bailing out");
            return Ok(Flow::Stop(StopReason::RoomFull { seat }));
        };
        tracing::info!(
            seat = seat.index,
            team = seat.team,
            duelist = seat.duelist,
            host = seat.is_host,
            "seated"
        );
        self.seat = Some(seat);

        if let Some(deck) = &self.deck {
            out.push(ctos::update_deck(deck)?);
        }
        out.push(OutboundMessage::fixed(&Ready));
        Ok(Flow::Continue)
    }

    fn on_game_msg(
        &mut self,
        payload: &[u8],
        out: &mut Vec<OutboundMessage>,
    ) -> Result<Flow, SessionError> {
        let Some(duel) = self.duel.as_mut() else {
            tracing::warn!(size = payload.len(), "game message before duel start ignored");
            return Ok(Flow::Continue);
        };
        match duel.pump(self.codec.as_ref(), payload, out) {
            Ok(_) => Ok(Flow::Continue),
            Err(err @ DuelError::Desync { .. }) if self.config.stop_on_desync => Err(err.into()),
            Err(err @ DuelError::Protocol(_)) => Err(err.into()),
            Err(err) => {
                tracing::error!(error = %err, "game message dropped");
                Ok(Flow::Continue)
            }
        }
    }

    fn choose_first_turn(&mut self) -> bool {
        let preference = self
            .duel
            .as_mut()
            .map(|duel| duel.engine_mut().wants_first_turn())
            .unwrap_or_default();
        match (preference, self.config.turn_order) {
            (TurnPreference::First, _) => true,
            (TurnPreference::Second, _) => false,
            (TurnPreference::Indifferent, TurnOrder::First) => true,
            (TurnPreference::Indifferent, TurnOrder::Second) => false,
            (TurnPreference::Indifferent, TurnOrder::Random) => rand::random(),
        }
    }
}

/// Reads a fixed record, logging and discarding a malformed one.
fn read<T: InboundRecord>(msg: &InboundMessage) -> Option<T> {
    msg.as_fixed::<T>()
        .inspect_err(|err| tracing::warn!(error = %err, "malformed message skipped"))
        .ok()
}
