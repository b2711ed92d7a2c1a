//! Integration tests for the duel message pump.

use std::sync::{Arc, Mutex};

use deskbot_duel::{
    Answer, Controller, DecisionEngine, DecodeStatus, Decoded, DuelCodec, DuelError, DuelEvent,
    DuelMessage, DuelState, EncodeContext, PassiveEngine, RawCoreCodec, Request,
};

// =========================================================================
// Helpers
// =========================================================================

/// Records every message it observes and answers with a fixed value.
struct RecordingEngine {
    seen: Arc<Mutex<Vec<DuelMessage>>>,
    answer: Answer,
}

impl DecisionEngine for RecordingEngine {
    fn observe(&mut self, msg: &DuelMessage) {
        self.seen.lock().unwrap().push(msg.clone());
    }

    fn answer(&mut self, _request: &Request) -> Answer {
        self.answer.clone()
    }
}

fn recording(answer: Answer) -> (DuelState, Arc<Mutex<Vec<DuelMessage>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let engine = RecordingEngine {
        seen: Arc::clone(&seen),
        answer,
    };
    (DuelState::new(Box::new(engine)), seen)
}

/// A codec that always claims a fixed number of bytes.
struct LyingCodec(usize);

impl DuelCodec for LyingCodec {
    fn decode(&self, _data: &[u8]) -> Decoded {
        Decoded {
            status: DecodeStatus::Ok(DuelMessage::event(DuelEvent::Other { id: 0 })),
            bytes_read: self.0,
        }
    }

    fn decode_special(
        &self,
        _ctx: &mut dyn EncodeContext,
        _data: &[u8],
    ) -> Result<DuelMessage, DuelError> {
        Err(DuelError::Codec("unused".into()))
    }

    fn encode_answer(
        &self,
        _ctx: &dyn EncodeContext,
        _request: &Request,
        _answer: &Answer,
    ) -> Result<Vec<u8>, DuelError> {
        Ok(Vec::new())
    }
}

// =========================================================================
// Splitting
// =========================================================================

#[test]
fn test_two_messages_of_five_and_seven_bytes() {
    let codec = RawCoreCodec::new();
    let (mut duel, seen) = recording(Answer::Int(0));

    let mut payload = RawCoreCodec::frame(40, &[]);
    payload.extend(RawCoreCodec::frame(41, &[0, 1]));
    assert_eq!(payload.len(), 12);

    let mut out = Vec::new();
    let report = duel.pump(&codec, &payload, &mut out).expect("pump");

    assert_eq!(report.messages, 2);
    assert_eq!(report.consumed, 12);
    assert!(!report.aborted);
    assert!(out.is_empty());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].as_event(), Some(&DuelEvent::Other { id: 40 }));
    assert_eq!(seen[1].as_event(), Some(&DuelEvent::Other { id: 41 }));
}

#[test]
fn test_empty_payload_does_nothing() {
    let (mut duel, seen) = recording(Answer::Int(0));
    let mut out = Vec::new();
    let report = duel.pump(&RawCoreCodec::new(), &[], &mut out).unwrap();
    assert_eq!(report.messages, 0);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_unknown_message_aborts_rest_of_payload() {
    let codec = RawCoreCodec::new();
    let (mut duel, seen) = recording(Answer::Int(0));

    let mut payload = RawCoreCodec::frame(40, &[]);
    // A zero length: there is no message id to go on.
    payload.extend([0, 0, 0, 0]);
    payload.extend(RawCoreCodec::frame(16, &[0]));

    let mut out = Vec::new();
    let report = duel.pump(&codec, &payload, &mut out).expect("not a desync");

    assert!(report.aborted);
    assert_eq!(report.messages, 1);
    assert_eq!(report.consumed, 5);
    assert_eq!(seen.lock().unwrap().len(), 1);
    // The request behind the unknown message was never reached.
    assert!(out.is_empty());
}

#[test]
fn test_truncated_message_is_desync() {
    let codec = RawCoreCodec::new();
    let (mut duel, seen) = recording(Answer::Int(0));

    let mut payload = RawCoreCodec::frame(40, &[]);
    let second = RawCoreCodec::frame(41, &[1, 2, 3]);
    payload.extend(&second[..second.len() - 2]);
    assert_eq!(payload.len(), 11);

    let mut out = Vec::new();
    let err = duel.pump(&codec, &payload, &mut out).unwrap_err();
    assert!(matches!(
        err,
        DuelError::Desync {
            consumed: 13,
            expected: 11
        }
    ));
    // The whole message in front was still routed.
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn test_cut_length_prefix_is_desync() {
    let codec = RawCoreCodec::new();
    let (mut duel, _) = recording(Answer::Int(0));

    let mut payload = RawCoreCodec::frame(40, &[]);
    payload.extend([3, 0]);

    let mut out = Vec::new();
    let err = duel.pump(&codec, &payload, &mut out).unwrap_err();
    assert!(matches!(
        err,
        DuelError::Desync {
            consumed: 9,
            expected: 7
        }
    ));
}

#[test]
fn test_overrun_is_desync() {
    let (mut duel, _) = recording(Answer::Int(0));
    let mut out = Vec::new();
    let err = duel.pump(&LyingCodec(10), &[0; 4], &mut out).unwrap_err();
    assert!(matches!(
        err,
        DuelError::Desync {
            consumed: 10,
            expected: 4
        }
    ));
}

#[test]
fn test_zero_progress_is_desync() {
    let (mut duel, seen) = recording(Answer::Int(0));
    let mut out = Vec::new();
    let err = duel.pump(&LyingCodec(0), &[1, 2, 3], &mut out).unwrap_err();
    assert!(matches!(err, DuelError::Desync { consumed: 0, expected: 3 }));
    assert!(seen.lock().unwrap().is_empty());
}

// =========================================================================
// Routing
// =========================================================================

#[test]
fn test_request_produces_response_frame() {
    let codec = RawCoreCodec::new();
    let (mut duel, _) = recording(Answer::Raw(vec![0xAB, 0xCD]));

    let mut payload = RawCoreCodec::frame(40, &[]);
    payload.extend(RawCoreCodec::frame(11, &[0, 9, 9]));

    let mut out = Vec::new();
    let report = duel.pump(&codec, &payload, &mut out).unwrap();

    assert_eq!(report.answered, 1);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].type_id(), 0x01);
    assert_eq!(out[0].body(), &[0xAB, 0xCD]);
}

#[test]
fn test_passive_engine_declines_chain() {
    let codec = RawCoreCodec::new();
    let mut duel = DuelState::new(Box::new(PassiveEngine::new()));

    let mut out = Vec::new();
    duel.pump(&codec, &RawCoreCodec::frame(16, &[1]), &mut out)
        .unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].body(), &(-1i32).to_le_bytes());
}

#[test]
fn test_special_message_reaches_shadow_and_engine() {
    let codec = RawCoreCodec::new();
    let (mut duel, seen) = recording(Answer::Int(0));

    let mut out = Vec::new();
    duel.pump(&codec, &RawCoreCodec::frame(5, &[0, 4]), &mut out)
        .unwrap();

    assert_eq!(duel.shadow().match_win_reason(), 4);
    let seen = seen.lock().unwrap();
    assert_eq!(
        seen[0].as_event(),
        Some(&DuelEvent::Win {
            winner: Some(Controller::ZERO),
            reason: 4
        })
    );
}

#[test]
fn test_shuffle_event_is_replayed() {
    let codec = RawCoreCodec::new();
    let (mut duel, seen) = recording(Answer::Int(0));

    let mut out = Vec::new();
    duel.pump(&codec, &RawCoreCodec::frame(33, &[1]), &mut out)
        .unwrap();

    let seen = seen.lock().unwrap();
    assert!(matches!(
        seen[0].as_event(),
        Some(DuelEvent::Shuffled { controller, .. }) if *controller == Controller::ONE
    ));
}
