//! The decision engine seam.

use crate::{Answer, DuelMessage, Request, RequestKind};

/// What the engine wants when the server asks who goes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPreference {
    First,
    Second,
    #[default]
    Indifferent,
}

/// Something that plays the duel.
///
/// The pump shows it every decoded message (after the board shadow has
/// replayed it) and asks for an answer whenever the message is a request.
pub trait DecisionEngine: Send {
    fn observe(&mut self, msg: &DuelMessage);

    fn answer(&mut self, request: &Request) -> Answer;

    fn wants_first_turn(&mut self) -> TurnPreference {
        TurnPreference::Indifferent
    }
}

/// Builds a fresh engine for each duel from the loaded script source.
pub trait EngineFactory: Send + Sync {
    fn create(&self, script: &str) -> Box<dyn DecisionEngine>;
}

impl<F> EngineFactory for F
where
    F: Fn(&str) -> Box<dyn DecisionEngine> + Send + Sync,
{
    fn create(&self, script: &str) -> Box<dyn DecisionEngine> {
        self(script)
    }
}

/// An engine that never takes initiative: it declines chains and otherwise
/// picks the first option.
#[derive(Debug, Default)]
pub struct PassiveEngine {
    observed: usize,
}

impl PassiveEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages seen so far this duel.
    pub fn observed(&self) -> usize {
        self.observed
    }
}

impl DecisionEngine for PassiveEngine {
    fn observe(&mut self, _msg: &DuelMessage) {
        self.observed += 1;
    }

    fn answer(&mut self, request: &Request) -> Answer {
        match request.kind {
            RequestKind::SelectChain => Answer::Int(-1),
            _ => Answer::Int(0),
        }
    }
}

/// Creates a [`PassiveEngine`] regardless of script.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassiveEngineFactory;

impl EngineFactory for PassiveEngineFactory {
    fn create(&self, script: &str) -> Box<dyn DecisionEngine> {
        tracing::debug!(script_len = script.len(), "creating passive engine");
        Box::new(PassiveEngine::new())
    }
}
