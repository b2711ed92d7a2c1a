//! Decoded duel messages and answers.

use crate::{Controller, Location, Place};

/// A card passcode. `0` means the card's identity is hidden.
pub type CardCode = u32;

/// Something that happened on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuelEvent {
    /// A card changed place. `None` on either side means it came from, or
    /// went to, somewhere the shadow doesn't track (e.g. a fresh token).
    Moved {
        code: CardCode,
        from: Option<Place>,
        to: Option<Place>,
    },
    /// Cards moved from the top of `controller`'s deck into their hand.
    Drawn {
        controller: Controller,
        codes: Vec<CardCode>,
    },
    /// A pile was shuffled; every card in it becomes unknown.
    Shuffled {
        controller: Controller,
        location: Location,
    },
    /// The duel ended. `winner` is `None` on a draw.
    Win {
        winner: Option<Controller>,
        reason: u32,
    },
    /// An event the shadow has no use for.
    Other { id: u8 },
}

/// What a query reports about a place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryData {
    /// The full, ordered contents of a pile.
    Pile(Vec<CardCode>),
    /// The single card at a place. `0` in a zone means the zone is empty.
    Card(CardCode),
    /// The materials attached to the card in a zone.
    Materials(Vec<CardCode>),
}

/// An authoritative snapshot the server attaches to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub place: Place,
    pub data: QueryData,
}

/// The kinds of decision the server can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    SelectBattleCommand,
    SelectIdleCommand,
    SelectEffectYesNo,
    SelectYesNo,
    SelectOption,
    SelectCard,
    SelectChain,
    SelectPlace,
    SelectPosition,
    SelectTribute,
    SortChain,
    SelectCounter,
    SelectSum,
    SelectDisabledField,
    SortCard,
    SelectUnselectCard,
    RockPaperScissors,
    AnnounceRace,
    AnnounceAttribute,
    AnnounceCard,
    AnnounceNumber,
}

/// A decision the server is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The player who must answer.
    pub player: Controller,
    pub kind: RequestKind,
    /// The request body exactly as the core sent it, for engines that need
    /// the option list.
    pub body: Vec<u8>,
}

/// Either half of a duel message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Event(DuelEvent),
    Request(Request),
}

/// One decoded duel message plus the queries that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelMessage {
    pub kind: MessageKind,
    pub queries: Vec<Query>,
}

impl DuelMessage {
    pub fn event(event: DuelEvent) -> Self {
        Self {
            kind: MessageKind::Event(event),
            queries: Vec::new(),
        }
    }

    pub fn request(request: Request) -> Self {
        Self {
            kind: MessageKind::Request(request),
            queries: Vec::new(),
        }
    }

    /// Attaches queries, applied after the message itself.
    pub fn with_queries(mut self, queries: Vec<Query>) -> Self {
        self.queries = queries;
        self
    }

    pub fn as_event(&self) -> Option<&DuelEvent> {
        match &self.kind {
            MessageKind::Event(event) => Some(event),
            MessageKind::Request(_) => None,
        }
    }

    pub fn as_request(&self) -> Option<&Request> {
        match &self.kind {
            MessageKind::Request(request) => Some(request),
            MessageKind::Event(_) => None,
        }
    }
}

/// A decision, before the codec turns it into response bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// A single index or value.
    Int(i32),
    /// Pre-encoded bytes, passed through untouched.
    Raw(Vec<u8>),
}
