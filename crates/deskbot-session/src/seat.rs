//! Where the server sat us.

use deskbot_protocol::stoc::TypeChange;

/// Highest seat index a room can hand out.
pub const MAX_SEAT: u8 = 6;

/// Our place in the room, derived from a seat-type change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    /// Room-wide seat index.
    pub index: u8,
    /// `0` or `1`.
    pub team: u8,
    /// Index within the team.
    pub duelist: u8,
    pub is_host: bool,
}

impl Seat {
    /// Derives the seat from a type change given the size of team 0.
    ///
    /// Seats below `t0_count` belong to team 0, the rest to team 1.
    /// Returns `None` if the masked index is past [`MAX_SEAT`], which the
    /// server uses to say the room is full.
    pub fn derive(change: TypeChange, t0_count: i32) -> Option<Self> {
        let index = change.seat();
        if index > MAX_SEAT {
            return None;
        }
        let t0 = u8::try_from(t0_count.max(0)).unwrap_or(u8::MAX);
        let (team, duelist) = if index >= t0 {
            (1, index - t0)
        } else {
            (0, index)
        };
        Some(Self {
            index,
            team,
            duelist,
            is_host: change.is_host(),
        })
    }
}
