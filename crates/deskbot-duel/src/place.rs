//! Board coordinates.

use std::fmt;

/// The player controlling a location: `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Controller(u8);

impl Controller {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// Builds a controller from a raw byte, keeping only the low bit.
    pub fn new(raw: u8) -> Self {
        Self(raw & 1)
    }

    /// The other player.
    pub fn opponent(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// The raw `0`/`1` value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A location category. Discriminants are the duel core's location bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum Location {
    Deck = 0x01,
    Hand = 0x02,
    MonsterZone = 0x04,
    SpellZone = 0x08,
    Graveyard = 0x10,
    Banished = 0x20,
    ExtraDeck = 0x40,
}

impl Location {
    /// Maps a location bit to a category. Combined masks and the overlay bit
    /// have no single category and return `None`.
    pub fn from_bits(bits: u32) -> Option<Self> {
        Some(match bits {
            0x01 => Self::Deck,
            0x02 => Self::Hand,
            0x04 => Self::MonsterZone,
            0x08 => Self::SpellZone,
            0x10 => Self::Graveyard,
            0x20 => Self::Banished,
            0x40 => Self::ExtraDeck,
            _ => return None,
        })
    }

    /// Piles are ordered stacks addressed by index; the rest are zones
    /// holding at most one card each.
    pub fn is_pile(self) -> bool {
        !matches!(self, Self::MonsterZone | Self::SpellZone)
    }
}

/// A position on the board.
///
/// `overlay` is set when the place names a material attached beneath the
/// card in zone (`controller`, `location`, `sequence`).
///
/// Field order gives the derived `Ord`: controller, then location, then
/// sequence, then overlay (`None` first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Place {
    pub controller: Controller,
    pub location: Location,
    pub sequence: u32,
    pub overlay: Option<u32>,
}

impl Place {
    pub fn new(controller: Controller, location: Location, sequence: u32) -> Self {
        Self {
            controller,
            location,
            sequence,
            overlay: None,
        }
    }

    /// The place of material `index` attached to this place's card.
    pub fn with_overlay(self, index: u32) -> Self {
        Self {
            overlay: Some(index),
            ..self
        }
    }

    /// The zone this place belongs to, with any overlay index dropped.
    pub fn zone(self) -> Self {
        Self {
            overlay: None,
            ..self
        }
    }

    /// `true` for the card itself in a monster or spell zone.
    pub fn is_zone_card(self) -> bool {
        self.overlay.is_none() && !self.location.is_pile()
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}#{}", self.controller, self.location, self.sequence)?;
        if let Some(index) = self.overlay {
            write!(f, "/mat{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_controller_masks_to_low_bit() {
        assert_eq!(Controller::new(3), Controller::ONE);
        assert_eq!(Controller::ZERO.opponent(), Controller::ONE);
    }

    #[test]
    fn test_location_from_bits() {
        assert_eq!(Location::from_bits(0x04), Some(Location::MonsterZone));
        assert_eq!(Location::from_bits(0x80), None);
        assert_eq!(Location::from_bits(0x0C), None);
        assert!(Location::Graveyard.is_pile());
        assert!(!Location::SpellZone.is_pile());
    }

    #[test]
    fn test_place_ordering_is_total_and_overlay_last() {
        let zone = Place::new(Controller::ZERO, Location::MonsterZone, 2);
        let mat = zone.with_overlay(0);
        let other = Place::new(Controller::ONE, Location::Deck, 0);

        let set: BTreeSet<_> = [other, mat, zone].into_iter().collect();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![zone, mat, other]);
        assert_eq!(mat.zone(), zone);
    }

    #[test]
    fn test_place_display() {
        let place = Place::new(Controller::ONE, Location::MonsterZone, 4).with_overlay(1);
        assert_eq!(place.to_string(), "p1 MonsterZone#4/mat1");
    }
}
