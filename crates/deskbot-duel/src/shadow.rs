//! A best-effort mirror of the duel board.
//!
//! The shadow replays every decoded message: first the message's own event,
//! then its queries in order. Queries are authoritative, so whatever the
//! event got wrong the next query overwrites.

use std::collections::BTreeMap;

use crate::{
    CardCode, Controller, DuelError, DuelEvent, DuelMessage, EncodeContext, Location,
    MessageKind, Place, Query, QueryData,
};

/// One monster or spell zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zone {
    pub card: Option<CardCode>,
    /// Attached materials, bottom first.
    pub materials: Vec<CardCode>,
}

impl Zone {
    fn is_vacant(&self) -> bool {
        self.card.is_none() && self.materials.is_empty()
    }
}

/// The client's picture of both players' boards.
#[derive(Debug, Clone, Default)]
pub struct BoardShadow {
    piles: BTreeMap<(Controller, Location), Vec<CardCode>>,
    zones: BTreeMap<Place, Zone>,
    match_win_reason: u32,
    left: BTreeMap<Place, Place>,
    deferred: Vec<Place>,
}

impl BoardShadow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a message's event (if any), then each of its queries in order.
    pub fn replay(&mut self, msg: &DuelMessage) {
        if let MessageKind::Event(event) = &msg.kind {
            self.apply_event(event);
        }
        for query in &msg.queries {
            self.apply_query(query);
        }
    }

    /// The ordered contents of a pile. Empty if the pile was never seen.
    pub fn pile(&self, controller: Controller, location: Location) -> &[CardCode] {
        self.piles
            .get(&(controller, location))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The zone at `place`, ignoring any overlay index.
    pub fn zone(&self, place: &Place) -> Option<&Zone> {
        self.zones.get(&place.zone())
    }

    fn apply_event(&mut self, event: &DuelEvent) {
        match event {
            DuelEvent::Moved { code, from, to } => {
                // Zone to zone, the attached materials go with the card.
                let carried = match (from, to) {
                    (Some(from), Some(to)) if from.is_zone_card() && to.is_zone_card() => Some(
                        self.zones
                            .get_mut(from)
                            .map(|zone| std::mem::take(&mut zone.materials))
                            .unwrap_or_default(),
                    ),
                    _ => None,
                };
                let taken = from.and_then(|place| self.remove(place));
                // The event's code wins unless it's hidden.
                let code = match (*code, taken) {
                    (0, Some(known)) => known,
                    (code, _) => code,
                };
                if let Some(place) = to {
                    self.insert(*place, code);
                    if let Some(materials) = carried {
                        self.zones.entry(*place).or_default().materials = materials;
                        self.prune(*place);
                    }
                }
            }
            DuelEvent::Drawn { controller, codes } => {
                for &code in codes {
                    self.pile_mut(*controller, Location::Deck).pop();
                    self.pile_mut(*controller, Location::Hand).push(code);
                }
            }
            DuelEvent::Shuffled {
                controller,
                location,
            } => {
                if let Some(pile) = self.piles.get_mut(&(*controller, *location)) {
                    pile.fill(0);
                }
            }
            DuelEvent::Win { .. } | DuelEvent::Other { .. } => {}
        }
    }

    fn apply_query(&mut self, query: &Query) {
        let place = query.place;
        match &query.data {
            QueryData::Pile(codes) => {
                if place.location.is_pile() {
                    *self.pile_mut(place.controller, place.location) = codes.clone();
                } else {
                    tracing::warn!(%place, "pile query for a zone ignored");
                }
            }
            QueryData::Card(code) => {
                if place.location.is_pile() {
                    let pile = self.pile_mut(place.controller, place.location);
                    match pile.get_mut(place.sequence as usize) {
                        Some(slot) => *slot = *code,
                        None => tracing::debug!(%place, "card query past end of pile"),
                    }
                } else {
                    let zone = self.zones.entry(place.zone()).or_default();
                    zone.card = (*code != 0).then_some(*code);
                    self.prune(place);
                }
            }
            QueryData::Materials(codes) => {
                self.zones.entry(place.zone()).or_default().materials = codes.clone();
                self.prune(place);
            }
        }
    }

    fn pile_mut(&mut self, controller: Controller, location: Location) -> &mut Vec<CardCode> {
        self.piles.entry((controller, location)).or_default()
    }

    fn remove(&mut self, place: Place) -> Option<CardCode> {
        let taken = if let Some(index) = place.overlay {
            let zone = self.zones.get_mut(&place.zone())?;
            let index = index as usize;
            (index < zone.materials.len()).then(|| zone.materials.remove(index))
        } else if place.location.is_pile() {
            let pile = self.piles.get_mut(&(place.controller, place.location))?;
            let index = place.sequence as usize;
            if index < pile.len() {
                Some(pile.remove(index))
            } else {
                // Keeps the pile size right even though the card is a guess.
                tracing::debug!(%place, len = pile.len(), "move from past end of pile");
                pile.pop()
            }
        } else {
            self.zones.get_mut(&place)?.card.take()
        };
        self.prune(place);
        taken
    }

    fn insert(&mut self, place: Place, code: CardCode) {
        if let Some(index) = place.overlay {
            let zone = self.zones.entry(place.zone()).or_default();
            let index = (index as usize).min(zone.materials.len());
            zone.materials.insert(index, code);
        } else if place.location.is_pile() {
            let pile = self.pile_mut(place.controller, place.location);
            let index = (place.sequence as usize).min(pile.len());
            pile.insert(index, code);
        } else {
            let zone = self.zones.entry(place).or_default();
            if let Some(previous) = zone.card.replace(code) {
                tracing::debug!(%place, previous, code, "zone overwritten");
            }
        }
    }

    fn prune(&mut self, place: Place) {
        let key = place.zone();
        if self.zones.get(&key).is_some_and(Zone::is_vacant) {
            self.zones.remove(&key);
        }
    }
}

impl EncodeContext for BoardShadow {
    fn pile_size(&self, controller: Controller, location: Location) -> usize {
        self.pile(controller, location).len()
    }

    fn match_win_reason(&self) -> u32 {
        self.match_win_reason
    }

    fn has_material(&self, place: &Place) -> bool {
        self.zone(place).is_some_and(|zone| !zone.materials.is_empty())
    }

    fn resolve_left_target(&self, left: &Place) -> Result<Place, DuelError> {
        self.left
            .get(left)
            .copied()
            .ok_or(DuelError::MissingLeftTarget(*left))
    }

    fn set_match_win_reason(&mut self, reason: u32) {
        self.match_win_reason = reason;
    }

    fn record_left_target(&mut self, left: Place, from: Place) {
        self.left.insert(left, from);
    }

    fn defer_material(&mut self, place: Place) {
        self.deferred.push(place);
    }

    fn take_deferred_materials(&mut self) -> Vec<Place> {
        std::mem::take(&mut self.deferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: Controller = Controller::ZERO;
    const P1: Controller = Controller::ONE;

    fn mzone(controller: Controller, seq: u32) -> Place {
        Place::new(controller, Location::MonsterZone, seq)
    }

    fn moved(code: CardCode, from: Option<Place>, to: Option<Place>) -> DuelMessage {
        DuelMessage::event(DuelEvent::Moved { code, from, to })
    }

    #[test]
    fn test_draw_moves_top_of_deck_to_hand() {
        let mut shadow = BoardShadow::new();
        shadow.replay(
            &DuelMessage::event(DuelEvent::Other { id: 0 }).with_queries(vec![Query {
                place: Place::new(P0, Location::Deck, 0),
                data: QueryData::Pile(vec![0, 0, 0]),
            }]),
        );
        shadow.replay(&DuelMessage::event(DuelEvent::Drawn {
            controller: P0,
            codes: vec![111, 222],
        }));

        assert_eq!(shadow.pile_size(P0, Location::Deck), 1);
        assert_eq!(shadow.pile(P0, Location::Hand), &[111, 222]);
        assert_eq!(shadow.pile_size(P1, Location::Hand), 0);
    }

    #[test]
    fn test_move_keeps_known_code_when_event_hides_it() {
        let mut shadow = BoardShadow::new();
        let hand = Place::new(P0, Location::Hand, 0);
        shadow.replay(&moved(555, None, Some(hand)));
        shadow.replay(&moved(0, Some(hand), Some(mzone(P0, 2))));

        assert_eq!(shadow.zone(&mzone(P0, 2)).and_then(|z| z.card), Some(555));
        assert!(shadow.pile(P0, Location::Hand).is_empty());
    }

    #[test]
    fn test_queries_apply_after_event() {
        let mut shadow = BoardShadow::new();
        let zone = mzone(P1, 0);
        // The event puts 1 in the zone; the query then says it's 9.
        let msg = moved(1, None, Some(zone)).with_queries(vec![Query {
            place: zone,
            data: QueryData::Card(9),
        }]);
        shadow.replay(&msg);
        assert_eq!(shadow.zone(&zone).and_then(|z| z.card), Some(9));
    }

    #[test]
    fn test_queries_apply_in_order() {
        let mut shadow = BoardShadow::new();
        let gy = Place::new(P0, Location::Graveyard, 0);
        let msg = DuelMessage::event(DuelEvent::Other { id: 1 }).with_queries(vec![
            Query {
                place: gy,
                data: QueryData::Pile(vec![1, 2]),
            },
            Query {
                place: gy,
                data: QueryData::Pile(vec![3]),
            },
        ]);
        shadow.replay(&msg);
        assert_eq!(shadow.pile(P0, Location::Graveyard), &[3]);
    }

    #[test]
    fn test_materials_and_has_material() {
        let mut shadow = BoardShadow::new();
        let zone = mzone(P0, 1);
        assert!(!shadow.has_material(&zone));

        shadow.replay(&moved(10, None, Some(zone)));
        shadow.replay(&moved(20, None, Some(zone.with_overlay(0))));
        assert!(shadow.has_material(&zone));
        assert!(shadow.has_material(&zone.with_overlay(3)));

        shadow.replay(&moved(
            0,
            Some(zone.with_overlay(0)),
            Some(Place::new(P0, Location::Graveyard, 0)),
        ));
        assert!(!shadow.has_material(&zone));
        assert_eq!(shadow.pile(P0, Location::Graveyard), &[20]);
    }

    #[test]
    fn test_materials_follow_card_between_zones() {
        let mut shadow = BoardShadow::new();
        let (a, b) = (mzone(P0, 1), mzone(P1, 2));
        shadow.replay(&moved(10, None, Some(a)));
        shadow.replay(&moved(20, None, Some(a.with_overlay(0))));
        assert!(shadow.has_material(&a));

        shadow.replay(&moved(10, Some(a), Some(b)));

        assert!(!shadow.has_material(&a));
        assert!(shadow.zone(&a).is_none());
        assert!(shadow.has_material(&b));
        assert_eq!(
            shadow.zone(&b),
            Some(&Zone {
                card: Some(10),
                materials: vec![20],
            })
        );

        // The next card into the old zone starts bare.
        shadow.replay(&moved(30, None, Some(a)));
        assert!(!shadow.has_material(&a));
    }

    #[test]
    fn test_move_to_pile_leaves_materials_behind() {
        let mut shadow = BoardShadow::new();
        let a = mzone(P0, 0);
        shadow.replay(&moved(10, None, Some(a)));
        shadow.replay(&moved(20, None, Some(a.with_overlay(0))));

        let grave = Place::new(P0, Location::Graveyard, 0);
        shadow.replay(&moved(10, Some(a), Some(grave)));

        assert_eq!(shadow.pile(P0, Location::Graveyard), &[10]);
        assert_eq!(shadow.zone(&a).map(|z| z.card), Some(None));
    }

    #[test]
    fn test_move_from_past_end_of_pile_still_shrinks_it() {
        let mut shadow = BoardShadow::new();
        let hand = Place::new(P0, Location::Hand, 0);
        shadow.replay(&moved(1, None, Some(hand)));
        shadow.replay(&moved(2, None, Some(hand)));

        shadow.replay(&moved(
            7,
            Some(Place::new(P0, Location::Hand, 9)),
            Some(mzone(P0, 0)),
        ));

        assert_eq!(shadow.pile_size(P0, Location::Hand), 1);
        assert_eq!(shadow.zone(&mzone(P0, 0)).and_then(|z| z.card), Some(7));
    }

    #[test]
    fn test_zone_query_with_zero_empties_zone() {
        let mut shadow = BoardShadow::new();
        let zone = Place::new(P1, Location::SpellZone, 3);
        shadow.replay(&moved(77, None, Some(zone)));
        shadow.replay(
            &DuelMessage::event(DuelEvent::Other { id: 2 }).with_queries(vec![Query {
                place: zone,
                data: QueryData::Card(0),
            }]),
        );
        assert!(shadow.zone(&zone).is_none());
    }

    #[test]
    fn test_shuffle_hides_pile() {
        let mut shadow = BoardShadow::new();
        let hand = Place::new(P1, Location::Hand, 0);
        shadow.replay(&moved(5, None, Some(hand)));
        shadow.replay(&moved(6, None, Some(hand)));
        shadow.replay(&DuelMessage::event(DuelEvent::Shuffled {
            controller: P1,
            location: Location::Hand,
        }));
        assert_eq!(shadow.pile(P1, Location::Hand), &[0, 0]);
    }

    #[test]
    fn test_deferred_materials_drain_once_in_order() {
        let mut shadow = BoardShadow::new();
        let a = mzone(P0, 0).with_overlay(0);
        let b = mzone(P1, 4).with_overlay(1);
        shadow.defer_material(a);
        shadow.defer_material(b);
        shadow.defer_material(a);

        assert_eq!(shadow.take_deferred_materials(), vec![a, b, a]);
        assert!(shadow.take_deferred_materials().is_empty());
    }

    #[test]
    fn test_left_target_roundtrip_and_missing() {
        let mut shadow = BoardShadow::new();
        let left = mzone(P0, 2).with_overlay(0);
        let from = mzone(P0, 3);

        assert!(matches!(
            shadow.resolve_left_target(&left),
            Err(DuelError::MissingLeftTarget(p)) if p == left
        ));
        shadow.record_left_target(left, from);
        assert_eq!(shadow.resolve_left_target(&left).unwrap(), from);
    }

    #[test]
    fn test_match_win_reason_defaults_to_zero() {
        let mut shadow = BoardShadow::new();
        assert_eq!(shadow.match_win_reason(), 0);
        shadow.set_match_win_reason(4);
        assert_eq!(shadow.match_win_reason(), 4);
    }
}
