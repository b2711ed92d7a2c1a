//! Server → client message types and their fixed records.

use crate::inbound::InboundRecord;
use crate::le;
use crate::types::HostInfo;

/// Type ids of the messages the server sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StocId {
    GameMsg = 0x01,
    ErrorMsg = 0x02,
    ChooseRps = 0x03,
    ChooseOrder = 0x04,
    RpsResult = 0x05,
    OrderResult = 0x06,
    ChangeSide = 0x07,
    WaitingSide = 0x08,
    DeckCount = 0x09,
    CreateGame = 0x11,
    JoinGame = 0x12,
    TypeChange = 0x13,
    LeaveGame = 0x14,
    DuelStart = 0x15,
    DuelEnd = 0x16,
    Replay = 0x17,
    TimeLimit = 0x18,
    Chat = 0x19,
    PlayerEnter = 0x20,
    PlayerChange = 0x21,
    WatchChange = 0x22,
    NewReplay = 0x30,
    Catchup = 0xF0,
    Rematch = 0xF1,
    WaitingRematch = 0xF2,
}

impl StocId {
    /// Maps a raw type byte to a known message type.
    pub fn from_u8(value: u8) -> Option<Self> {
        use StocId::*;
        Some(match value {
            0x01 => GameMsg,
            0x02 => ErrorMsg,
            0x03 => ChooseRps,
            0x04 => ChooseOrder,
            0x05 => RpsResult,
            0x06 => OrderResult,
            0x07 => ChangeSide,
            0x08 => WaitingSide,
            0x09 => DeckCount,
            0x11 => CreateGame,
            0x12 => JoinGame,
            0x13 => TypeChange,
            0x14 => LeaveGame,
            0x15 => DuelStart,
            0x16 => DuelEnd,
            0x17 => Replay,
            0x18 => TimeLimit,
            0x19 => Chat,
            0x20 => PlayerEnter,
            0x21 => PlayerChange,
            0x22 => WatchChange,
            0x30 => NewReplay,
            0xF0 => Catchup,
            0xF1 => Rematch,
            0xF2 => WaitingRematch,
            _ => return None,
        })
    }
}

/// A generic server error. Shares its type id with [`DeckError`]; the two
/// are told apart by body size.
///
/// Layout: `msg u8`, 3 bytes padding, `code u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMsg {
    pub msg: u8,
    pub code: u32,
}

impl InboundRecord for ErrorMsg {
    const ID: StocId = StocId::ErrorMsg;
    const SIZE: usize = 8;

    fn read_body(body: &[u8]) -> Self {
        Self {
            msg: le::get_u8(body, 0),
            code: le::get_u32(body, 4),
        }
    }
}

/// A deck validation failure.
///
/// Layout: `msg u8`, 3 bytes padding, `error_type u32`, then
/// `current`/`minimum`/`maximum` counts and the offending `code`, all `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckError {
    pub msg: u8,
    pub error_type: u32,
    pub current: u32,
    pub minimum: u32,
    pub maximum: u32,
    pub code: u32,
}

impl InboundRecord for DeckError {
    const ID: StocId = StocId::ErrorMsg;
    const SIZE: usize = 24;

    fn read_body(body: &[u8]) -> Self {
        Self {
            msg: le::get_u8(body, 0),
            error_type: le::get_u32(body, 4),
            current: le::get_u32(body, 8),
            minimum: le::get_u32(body, 12),
            maximum: le::get_u32(body, 16),
            code: le::get_u32(body, 20),
        }
    }
}

/// Join acknowledgement carrying the room's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinGame {
    pub host_info: HostInfo,
}

impl InboundRecord for JoinGame {
    const ID: StocId = StocId::JoinGame;
    const SIZE: usize = HostInfo::SIZE;

    fn read_body(body: &[u8]) -> Self {
        Self {
            host_info: HostInfo::read(body, 0),
        }
    }
}

/// Seat assignment: low nibble = seat index, bit 4 = host flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeChange {
    pub value: u8,
}

impl TypeChange {
    /// Seat index within the room.
    pub fn seat(&self) -> u8 {
        self.value & 0x0F
    }

    /// Whether this client is the room host.
    pub fn is_host(&self) -> bool {
        self.value & 0x10 != 0
    }
}

impl InboundRecord for TypeChange {
    const ID: StocId = StocId::TypeChange;
    const SIZE: usize = 1;

    fn read_body(body: &[u8]) -> Self {
        Self {
            value: le::get_u8(body, 0),
        }
    }
}

/// Another seat's state changed: high nibble = seat, low nibble = state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerChange {
    pub value: u8,
}

impl PlayerChange {
    /// Low-nibble state value meaning "ready".
    pub const READY: u8 = 0x9;

    /// Seat whose state changed.
    pub fn seat(&self) -> u8 {
        self.value >> 4
    }

    /// Whether the change is the ready bit pattern.
    pub fn is_ready(&self) -> bool {
        self.value & 0x0F == Self::READY
    }
}

impl InboundRecord for PlayerChange {
    const ID: StocId = StocId::PlayerChange;
    const SIZE: usize = 1;

    fn read_body(body: &[u8]) -> Self {
        Self {
            value: le::get_u8(body, 0),
        }
    }
}
