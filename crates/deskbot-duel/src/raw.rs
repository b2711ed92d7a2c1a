//! A minimal codec for the duel core's raw message buffer.
//!
//! Each message is `[u32 LE length][u8 id][body]`, where `length` counts the
//! id byte and the body. This codec recognizes the decision requests, the
//! handful of events the shadow tracks without board queries, and the win
//! message; everything else passes through as [`DuelEvent::Other`].

use crate::{
    Answer, Controller, Decoded, DecodeStatus, DuelCodec, DuelError, DuelEvent, DuelMessage,
    EncodeContext, Location, Request, RequestKind,
};

const LENGTH_SIZE: usize = 4;

const MSG_WIN: u8 = 5;
const MSG_SHUFFLE_DECK: u8 = 32;
const MSG_SHUFFLE_HAND: u8 = 33;

/// The winner byte of a drawn duel.
const DRAW_PLAYER: u8 = 2;

fn request_kind(id: u8) -> Option<RequestKind> {
    use RequestKind::*;
    Some(match id {
        10 => SelectBattleCommand,
        11 => SelectIdleCommand,
        12 => SelectEffectYesNo,
        13 => SelectYesNo,
        14 => SelectOption,
        15 => SelectCard,
        16 => SelectChain,
        18 => SelectPlace,
        19 => SelectPosition,
        20 => SelectTribute,
        21 => SortChain,
        22 => SelectCounter,
        23 => SelectSum,
        24 => SelectDisabledField,
        25 => SortCard,
        26 => SelectUnselectCard,
        132 => RockPaperScissors,
        140 => AnnounceRace,
        141 => AnnounceAttribute,
        142 => AnnounceCard,
        143 => AnnounceNumber,
        _ => return None,
    })
}

/// The message at the front of a buffer, as its length prefix describes it.
enum Frame<'a> {
    Whole { id: u8, body: &'a [u8], total: usize },
    /// The prefix claims `claimed` bytes but fewer remain.
    Short { claimed: usize },
    /// A zero length: no id byte at all.
    Empty,
}

fn split(data: &[u8]) -> Frame<'_> {
    let Some(length) = data.get(..LENGTH_SIZE) else {
        return Frame::Short {
            claimed: LENGTH_SIZE,
        };
    };
    let length = u32::from_le_bytes([length[0], length[1], length[2], length[3]]) as usize;
    let total = LENGTH_SIZE.saturating_add(length);
    let Some(message) = data.get(LENGTH_SIZE..total) else {
        return Frame::Short { claimed: total };
    };
    match message.split_first() {
        Some((&id, body)) => Frame::Whole { id, body, total },
        None => Frame::Empty,
    }
}

/// The raw-buffer codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawCoreCodec;

impl RawCoreCodec {
    pub fn new() -> Self {
        Self
    }

    /// Frames one message the way [`RawCoreCodec::decode`] expects it.
    pub fn frame(id: u8, body: &[u8]) -> Vec<u8> {
        let length = (body.len() + 1) as u32;
        let mut out = Vec::with_capacity(LENGTH_SIZE + 1 + body.len());
        out.extend_from_slice(&length.to_le_bytes());
        out.push(id);
        out.extend_from_slice(body);
        out
    }
}

impl DuelCodec for RawCoreCodec {
    fn decode(&self, data: &[u8]) -> Decoded {
        let (id, body, total) = match split(data) {
            Frame::Whole { id, body, total } => (id, body, total),
            Frame::Short { claimed } => {
                return Decoded {
                    status: DecodeStatus::Truncated,
                    bytes_read: claimed,
                };
            }
            Frame::Empty => {
                return Decoded {
                    status: DecodeStatus::Unknown,
                    bytes_read: 0,
                };
            }
        };

        let status = if id == MSG_WIN {
            DecodeStatus::Special
        } else if let Some(kind) = request_kind(id) {
            let player = Controller::new(body.first().copied().unwrap_or_default());
            DecodeStatus::Ok(DuelMessage::request(Request {
                player,
                kind,
                body: body.to_vec(),
            }))
        } else {
            let event = match (id, body.first()) {
                (MSG_SHUFFLE_DECK, Some(&player)) => DuelEvent::Shuffled {
                    controller: Controller::new(player),
                    location: Location::Deck,
                },
                (MSG_SHUFFLE_HAND, Some(&player)) => DuelEvent::Shuffled {
                    controller: Controller::new(player),
                    location: Location::Hand,
                },
                _ => DuelEvent::Other { id },
            };
            DecodeStatus::Ok(DuelMessage::event(event))
        };

        Decoded {
            status,
            bytes_read: total,
        }
    }

    fn decode_special(
        &self,
        ctx: &mut dyn EncodeContext,
        data: &[u8],
    ) -> Result<DuelMessage, DuelError> {
        match split(data) {
            Frame::Whole {
                id: MSG_WIN,
                body: &[player, reason, ..],
                ..
            } => {
                let reason = u32::from(reason);
                ctx.set_match_win_reason(reason);
                let winner = (player != DRAW_PLAYER).then(|| Controller::new(player));
                Ok(DuelMessage::event(DuelEvent::Win { winner, reason }))
            }
            Frame::Whole { id, .. } => Err(DuelError::Codec(format!(
                "message {id} has no special decoding"
            ))),
            Frame::Short { .. } | Frame::Empty => {
                Err(DuelError::Codec("truncated special message".into()))
            }
        }
    }

    fn encode_answer(
        &self,
        _ctx: &dyn EncodeContext,
        _request: &Request,
        answer: &Answer,
    ) -> Result<Vec<u8>, DuelError> {
        Ok(match answer {
            Answer::Int(value) => value.to_le_bytes().to_vec(),
            Answer::Raw(bytes) => bytes.clone(),
        })
    }
}
