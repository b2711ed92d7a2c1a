//! Client → server message types and their fixed records.

use crate::le;
use crate::outbound::{OutboundMessage, OutboundRecord};
use crate::types::{ClientVersion, HostInfo, NAME_MAX_LENGTH, NOTES_MAX_LENGTH};
use crate::ProtocolError;

/// Type ids of the messages this client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CtosId {
    Response = 0x01,
    UpdateDeck = 0x02,
    RpsChoice = 0x03,
    TurnChoice = 0x04,
    PlayerInfo = 0x10,
    CreateGame = 0x11,
    JoinGame = 0x12,
    Chat = 0x16,
    ToDuelist = 0x20,
    Ready = 0x22,
    TryStart = 0x25,
    Rematch = 0xF0,
}

/// Announces the player's name. Always the first message sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub name: [u16; NAME_MAX_LENGTH],
}

impl OutboundRecord for PlayerInfo {
    const ID: CtosId = CtosId::PlayerInfo;
    const SIZE: usize = NAME_MAX_LENGTH * 2;

    fn write_body(&self, body: &mut [u8]) {
        le::put_u16_array(body, 0, &self.name);
    }
}

/// Creates a room with the given settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGame {
    pub host_info: HostInfo,
    pub name: [u16; NAME_MAX_LENGTH],
    pub pass: [u16; NAME_MAX_LENGTH],
    pub notes: [u8; NOTES_MAX_LENGTH],
}

impl Default for CreateGame {
    fn default() -> Self {
        Self {
            host_info: HostInfo::default(),
            name: [0; NAME_MAX_LENGTH],
            pass: [0; NAME_MAX_LENGTH],
            notes: [0; NOTES_MAX_LENGTH],
        }
    }
}

impl OutboundRecord for CreateGame {
    const ID: CtosId = CtosId::CreateGame;
    const SIZE: usize = HostInfo::SIZE + NAME_MAX_LENGTH * 4 + NOTES_MAX_LENGTH;

    fn write_body(&self, body: &mut [u8]) {
        self.host_info.write(body, 0);
        let name_at = HostInfo::SIZE;
        let pass_at = name_at + NAME_MAX_LENGTH * 2;
        let notes_at = pass_at + NAME_MAX_LENGTH * 2;
        le::put_u16_array(body, name_at, &self.name);
        le::put_u16_array(body, pass_at, &self.pass);
        body[notes_at..notes_at + NOTES_MAX_LENGTH].copy_from_slice(&self.notes);
    }
}

/// Joins an existing room.
///
/// Layout: `version2 u16`, 2 bytes padding, `id u32`, `pass [u16; 20]`,
/// `version [u8; 4]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinGame {
    pub version2: u16,
    pub id: u32,
    pub pass: [u16; NAME_MAX_LENGTH],
    pub version: ClientVersion,
}

impl OutboundRecord for JoinGame {
    const ID: CtosId = CtosId::JoinGame;
    const SIZE: usize = 8 + NAME_MAX_LENGTH * 2 + ClientVersion::SIZE;

    fn write_body(&self, body: &mut [u8]) {
        le::put_u16(body, 0, self.version2);
        le::put_u32(body, 4, self.id);
        le::put_u16_array(body, 8, &self.pass);
        self.version.write(body, 8 + NAME_MAX_LENGTH * 2);
    }
}

macro_rules! byte_record {
    ($(#[$meta:meta])* $name:ident => $id:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            pub value: u8,
        }

        impl OutboundRecord for $name {
            const ID: CtosId = CtosId::$id;
            const SIZE: usize = 1;

            fn write_body(&self, body: &mut [u8]) {
                le::put_u8(body, 0, self.value);
            }
        }
    };
}

byte_record!(
    /// Rock-paper-scissors hand (1 = scissors, 2 = rock, 3 = paper).
    RpsChoice => RpsChoice
);
byte_record!(
    /// Turn order decision: 1 = go first, 0 = go second.
    TurnChoice => TurnChoice
);
byte_record!(
    /// Rematch decision: 1 = accept.
    Rematch => Rematch
);

/// Marks this player as ready. Empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ready;

impl OutboundRecord for Ready {
    const ID: CtosId = CtosId::Ready;
    const SIZE: usize = 0;

    fn write_body(&self, _body: &mut [u8]) {}
}

/// Asks the server to start the duel (host only). Empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TryStart;

impl OutboundRecord for TryStart {
    const ID: CtosId = CtosId::TryStart;
    const SIZE: usize = 0;

    fn write_body(&self, _body: &mut [u8]) {}
}

/// Builds a deck submission: main count, a zero side count, then each code.
///
/// # Errors
/// Returns [`ProtocolError::FrameTooLarge`] if the deck doesn't fit in one
/// outbound frame.
pub fn update_deck(main: &[u32]) -> Result<OutboundMessage, ProtocolError> {
    let mut msg = OutboundMessage::begin_dynamic(CtosId::UpdateDeck);
    msg.append(main.len() as u32)?;
    msg.append(0u32)?;
    for code in main {
        msg.append(*code)?;
    }
    Ok(msg)
}

/// Wraps an encoded duel answer in a response frame.
///
/// # Errors
/// Returns [`ProtocolError::FrameTooLarge`] if the answer doesn't fit.
pub fn response(answer: &[u8]) -> Result<OutboundMessage, ProtocolError> {
    let mut msg = OutboundMessage::begin_dynamic(CtosId::Response);
    msg.append_bytes(answer)?;
    Ok(msg)
}
