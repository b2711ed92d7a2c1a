//! Session configuration.

use deskbot_protocol::HostInfo;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TurnOrder
// ---------------------------------------------------------------------------

/// What to answer when asked who goes first and the engine has no opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrder {
    First,
    #[default]
    Second,
    /// Flip a coin each time.
    Random,
}

// ---------------------------------------------------------------------------
// RoomChoice
// ---------------------------------------------------------------------------

/// Settings for a room this client creates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostOptions {
    pub host_info: HostInfo,
    pub name: String,
    pub password: String,
    pub notes: String,
}

/// Whether to join an existing room or host a new one.
///
/// In JSON: `{"join": {"id": 1, "password": ""}}` or
/// `{"host": {"host_info": {...}, "name": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomChoice {
    Join {
        id: u32,
        #[serde(default)]
        password: String,
    },
    Host(HostOptions),
}

impl RoomChoice {
    pub fn is_host(&self) -> bool {
        matches!(self, Self::Host(_))
    }
}

impl Default for RoomChoice {
    fn default() -> Self {
        Self::Join {
            id: 1,
            password: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Everything the dispatcher needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Shown to the other players. Cut to 19 UTF-16 units on the wire.
    pub player_name: String,

    pub room: RoomChoice,

    /// Fallback when the engine is indifferent about going first.
    /// Default: second.
    pub turn_order: TurnOrder,

    /// End the session when the duel stream desynchronizes. When `false`
    /// the bad payload is dropped and the session carries on.
    pub stop_on_desync: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_name: "Deskbot".into(),
            room: RoomChoice::default(),
            turn_order: TurnOrder::default(),
            stop_on_desync: true,
        }
    }
}
