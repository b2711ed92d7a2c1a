//! Structures shared by both directions of the room protocol.

use serde::{Deserialize, Serialize};

use crate::le;

/// UTF-16 code units in a player name or room password field.
pub const NAME_MAX_LENGTH: usize = 20;

/// Bytes in the room notes field.
pub const NOTES_MAX_LENGTH: usize = 200;

/// Handshake constant the server checks when a room is created.
pub const HANDSHAKE: u32 = 4_043_399_681;

/// The client/core version pair this client reports.
pub const CLIENT_VERSION: ClientVersion = ClientVersion {
    client: Version { major: 39, minor: 1 },
    core: Version { major: 9, minor: 0 },
};

/// A `major.minor` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

/// Client and duel-core versions, 4 bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientVersion {
    pub client: Version,
    pub core: Version,
}

impl ClientVersion {
    pub(crate) const SIZE: usize = 4;

    pub(crate) fn write(&self, buf: &mut [u8], at: usize) {
        le::put_u8(buf, at, self.client.major);
        le::put_u8(buf, at + 1, self.client.minor);
        le::put_u8(buf, at + 2, self.core.major);
        le::put_u8(buf, at + 3, self.core.minor);
    }

    pub(crate) fn read(buf: &[u8], at: usize) -> Self {
        Self {
            client: Version {
                major: le::get_u8(buf, at),
                minor: le::get_u8(buf, at + 1),
            },
            core: Version {
                major: le::get_u8(buf, at + 2),
                minor: le::get_u8(buf, at + 3),
            },
        }
    }
}

/// Room settings, sent by the host when creating a room and echoed by the
/// server in its join acknowledgement.
///
/// Layout (56 bytes, natural alignment):
///
/// ```text
///  0 banlist_hash u32     16 starting_draw_count u8   36 t1_count i32
///  4 allowed u8           17 draw_count_per_turn u8   40 best_of i32
///  5 mode u8              18 time_limit u16           44 duel_flags_low u32
///  6 duel_rule u8         20 duel_flags_high u32      48 forbidden_types i32
///  7 dont_check_deck u8   24 handshake u32            52 extra_rules u16
///  8 dont_shuffle_deck u8 28 version [u8; 4]
/// 12 starting_lp u32      32 t0_count i32
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostInfo {
    pub banlist_hash: u32,
    pub allowed: u8,
    pub mode: u8,
    pub duel_rule: u8,
    pub dont_check_deck: bool,
    pub dont_shuffle_deck: bool,
    pub starting_lp: u32,
    pub starting_draw_count: u8,
    pub draw_count_per_turn: u8,
    pub time_limit_in_seconds: u16,
    pub duel_flags_high: u32,
    pub handshake: u32,
    pub version: ClientVersion,
    pub t0_count: i32,
    pub t1_count: i32,
    pub best_of: i32,
    pub duel_flags_low: u32,
    pub forbidden_types: i32,
    pub extra_rules: u16,
}

impl Default for HostInfo {
    fn default() -> Self {
        Self {
            banlist_hash: 0,
            allowed: 0,
            mode: 0,
            duel_rule: 0,
            dont_check_deck: false,
            dont_shuffle_deck: false,
            starting_lp: 8000,
            starting_draw_count: 5,
            draw_count_per_turn: 1,
            time_limit_in_seconds: 0,
            duel_flags_high: 0,
            handshake: HANDSHAKE,
            version: CLIENT_VERSION,
            t0_count: 1,
            t1_count: 1,
            best_of: 1,
            duel_flags_low: 0,
            forbidden_types: 0,
            extra_rules: 0,
        }
    }
}

impl HostInfo {
    /// Encoded size in bytes.
    pub const SIZE: usize = 56;

    /// Stores a 64-bit duel flag set into its two 32-bit halves.
    pub fn set_duel_flags(&mut self, flags: u64) {
        let (low, high) = split_flags(flags);
        self.duel_flags_low = low;
        self.duel_flags_high = high;
    }

    /// The 64-bit duel flag set reassembled from its halves.
    pub fn duel_flags(&self) -> u64 {
        (u64::from(self.duel_flags_high) << 32) | u64::from(self.duel_flags_low)
    }

    pub(crate) fn write(&self, buf: &mut [u8], at: usize) {
        le::put_u32(buf, at, self.banlist_hash);
        le::put_u8(buf, at + 4, self.allowed);
        le::put_u8(buf, at + 5, self.mode);
        le::put_u8(buf, at + 6, self.duel_rule);
        le::put_u8(buf, at + 7, u8::from(self.dont_check_deck));
        le::put_u8(buf, at + 8, u8::from(self.dont_shuffle_deck));
        le::put_u32(buf, at + 12, self.starting_lp);
        le::put_u8(buf, at + 16, self.starting_draw_count);
        le::put_u8(buf, at + 17, self.draw_count_per_turn);
        le::put_u16(buf, at + 18, self.time_limit_in_seconds);
        le::put_u32(buf, at + 20, self.duel_flags_high);
        le::put_u32(buf, at + 24, self.handshake);
        self.version.write(buf, at + 28);
        le::put_i32(buf, at + 32, self.t0_count);
        le::put_i32(buf, at + 36, self.t1_count);
        le::put_i32(buf, at + 40, self.best_of);
        le::put_u32(buf, at + 44, self.duel_flags_low);
        le::put_i32(buf, at + 48, self.forbidden_types);
        le::put_u16(buf, at + 52, self.extra_rules);
    }

    pub(crate) fn read(buf: &[u8], at: usize) -> Self {
        Self {
            banlist_hash: le::get_u32(buf, at),
            allowed: le::get_u8(buf, at + 4),
            mode: le::get_u8(buf, at + 5),
            duel_rule: le::get_u8(buf, at + 6),
            dont_check_deck: le::get_u8(buf, at + 7) != 0,
            dont_shuffle_deck: le::get_u8(buf, at + 8) != 0,
            starting_lp: le::get_u32(buf, at + 12),
            starting_draw_count: le::get_u8(buf, at + 16),
            draw_count_per_turn: le::get_u8(buf, at + 17),
            time_limit_in_seconds: le::get_u16(buf, at + 18),
            duel_flags_high: le::get_u32(buf, at + 20),
            handshake: le::get_u32(buf, at + 24),
            version: ClientVersion::read(buf, at + 28),
            t0_count: le::get_i32(buf, at + 32),
            t1_count: le::get_i32(buf, at + 36),
            best_of: le::get_i32(buf, at + 40),
            duel_flags_low: le::get_u32(buf, at + 44),
            forbidden_types: le::get_i32(buf, at + 48),
            extra_rules: le::get_u16(buf, at + 52),
        }
    }
}

/// Splits a 64-bit flag set into `(low, high)` 32-bit halves.
pub const fn split_flags(flags: u64) -> (u32, u32) {
    ((flags & 0xFFFF_FFFF) as u32, (flags >> 32) as u32)
}

/// Encodes a name as a NUL-terminated UTF-16 field.
///
/// Names longer than the field are cut so the terminator always fits.
pub fn encode_name(name: &str) -> [u16; NAME_MAX_LENGTH] {
    let mut out = [0u16; NAME_MAX_LENGTH];
    for (slot, unit) in out.iter_mut().take(NAME_MAX_LENGTH - 1).zip(name.encode_utf16()) {
        *slot = unit;
    }
    out
}

/// Encodes room notes as a NUL-terminated UTF-8 field, cut on a character
/// boundary.
pub fn encode_notes(notes: &str) -> [u8; NOTES_MAX_LENGTH] {
    let mut end = notes.len().min(NOTES_MAX_LENGTH - 1);
    while !notes.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = [0u8; NOTES_MAX_LENGTH];
    out[..end].copy_from_slice(&notes.as_bytes()[..end]);
    out
}
