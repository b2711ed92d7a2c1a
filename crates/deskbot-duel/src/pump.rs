//! Splits game-message payloads into duel messages and routes them.

use deskbot_protocol::{OutboundMessage, ctos};

use crate::{BoardShadow, DecisionEngine, DecodeStatus, DuelCodec, DuelError, DuelMessage};

/// What one call to [`DuelState::pump`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Messages decoded and routed.
    pub messages: usize,
    /// Payload bytes those messages occupied.
    pub consumed: usize,
    /// Responses queued.
    pub answered: usize,
    /// `true` if an unknown message cut the payload short.
    pub aborted: bool,
}

/// Everything that lives exactly as long as one duel.
pub struct DuelState {
    shadow: BoardShadow,
    engine: Box<dyn DecisionEngine>,
}

impl DuelState {
    pub fn new(engine: Box<dyn DecisionEngine>) -> Self {
        Self {
            shadow: BoardShadow::new(),
            engine,
        }
    }

    pub fn shadow(&self) -> &BoardShadow {
        &self.shadow
    }

    pub fn engine_mut(&mut self) -> &mut dyn DecisionEngine {
        self.engine.as_mut()
    }

    /// Processes one game-message payload.
    ///
    /// Each decoded message is replayed into the shadow, then shown to the
    /// engine. Requests are answered and the encoded answer is pushed onto
    /// `out` as a Response frame. An unknown message stops processing of
    /// the rest of the payload; that isn't an error.
    ///
    /// # Errors
    /// - [`DuelError::Desync`] if the codec claims zero bytes or more bytes
    ///   than remain, or reports a truncated message
    /// - anything the codec returns while decoding or encoding
    pub fn pump(
        &mut self,
        codec: &dyn DuelCodec,
        payload: &[u8],
        out: &mut Vec<OutboundMessage>,
    ) -> Result<PumpReport, DuelError> {
        let mut report = PumpReport::default();

        while report.consumed < payload.len() {
            let rest = &payload[report.consumed..];
            let decoded = codec.decode(rest);
            let bytes_read = decoded.bytes_read;

            let msg = match decoded.status {
                DecodeStatus::Unknown => {
                    tracing::warn!(
                        offset = report.consumed,
                        remaining = rest.len(),
                        "unknown duel message, dropping rest of payload"
                    );
                    report.aborted = true;
                    return Ok(report);
                }
                DecodeStatus::Truncated => {
                    return Err(DuelError::Desync {
                        consumed: report.consumed + bytes_read,
                        expected: payload.len(),
                    });
                }
                _ if bytes_read == 0 || bytes_read > rest.len() => {
                    return Err(DuelError::Desync {
                        consumed: report.consumed + bytes_read,
                        expected: payload.len(),
                    });
                }
                DecodeStatus::Ok(msg) => msg,
                DecodeStatus::Special => {
                    codec.decode_special(&mut self.shadow, &rest[..bytes_read])?
                }
            };
            report.consumed += bytes_read;
            report.messages += 1;

            if self.route(codec, &msg, out)? {
                report.answered += 1;
            }
        }

        if report.consumed != payload.len() {
            return Err(DuelError::Desync {
                consumed: report.consumed,
                expected: payload.len(),
            });
        }
        tracing::trace!(
            messages = report.messages,
            size = report.consumed,
            "game message processed"
        );
        Ok(report)
    }

    /// Replays, observes, and answers one message. Returns whether a
    /// response was queued.
    fn route(
        &mut self,
        codec: &dyn DuelCodec,
        msg: &DuelMessage,
        out: &mut Vec<OutboundMessage>,
    ) -> Result<bool, DuelError> {
        self.shadow.replay(msg);
        self.engine.observe(msg);

        let Some(request) = msg.as_request() else {
            return Ok(false);
        };
        let answer = self.engine.answer(request);
        let bytes = codec.encode_answer(&self.shadow, request, &answer)?;
        tracing::debug!(kind = ?request.kind, ?answer, "answering request");
        out.push(ctos::response(&bytes)?);
        Ok(true)
    }
}
