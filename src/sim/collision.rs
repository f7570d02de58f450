//! Collision resolution
//!
//! Geometry tests happen in the host's physics layer. The core receives the
//! colliding pair and decides whether it eats a candy.

use serde::{Deserialize, Serialize};

use super::state::{CandyId, GameState, HandId};

/// A collision-began event between a hand and a candy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub hand: HandId,
    pub candy: CandyId,
}

impl CollisionEvent {
    pub fn new(hand: usize, candy: usize) -> Self {
        Self {
            hand: HandId(hand),
            candy: CandyId(candy),
        }
    }

    /// Hands only ever eat their own candy
    pub fn is_paired(&self) -> bool {
        self.hand.paired_candy() == self.candy
    }
}

/// Apply a collision to the state.
///
/// Returns the candy that was caught by this event, if any. Mismatched pairs,
/// unknown ids and candies that are already gone are ignored.
pub fn resolve_collision(state: &mut GameState, event: &CollisionEvent) -> Option<CandyId> {
    if !event.is_paired() || state.hand(event.hand).is_none() {
        return None;
    }

    let candy = state.candy_mut(event.candy)?;
    if !candy.active {
        return None;
    }
    candy.handle_catch().then_some(candy.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn spawned_state() -> GameState {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.spawn_entities(&tuning);
        state
    }

    #[test]
    fn test_matching_pair_catches() {
        let mut state = spawned_state();
        let caught = resolve_collision(&mut state, &CollisionEvent::new(1, 1));

        assert_eq!(caught, Some(CandyId(1)));
        assert!(state.candies[1].caught);
        assert!(!state.candies[1].active);
        assert!(!state.candies[0].caught);
    }

    #[test]
    fn test_mismatched_pair_ignored() {
        let mut state = spawned_state();
        let before = state.clone();

        assert_eq!(resolve_collision(&mut state, &CollisionEvent::new(0, 2)), None);
        assert_eq!(resolve_collision(&mut state, &CollisionEvent::new(2, 1)), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_second_collision_is_noop() {
        let mut state = spawned_state();
        let event = CollisionEvent::new(2, 2);

        assert_eq!(resolve_collision(&mut state, &event), Some(CandyId(2)));
        let after_first = state.clone();
        assert_eq!(resolve_collision(&mut state, &event), None);
        assert_eq!(state, after_first);
    }

    #[test]
    fn test_unknown_ids_ignored() {
        let mut state = spawned_state();
        assert_eq!(resolve_collision(&mut state, &CollisionEvent::new(7, 7)), None);

        // Nothing spawned yet
        let mut empty = GameState::new(&Tuning::default());
        assert_eq!(resolve_collision(&mut empty, &CollisionEvent::new(0, 0)), None);
    }
}
