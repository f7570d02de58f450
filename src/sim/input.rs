//! Tap input resolution
//!
//! Screen-to-entity hit testing belongs to the host; a tap arrives here
//! already resolved to the entity under the finger, if any.

use serde::{Deserialize, Serialize};

use super::state::{CandyId, GameState, HandId};
use crate::tuning::Tuning;

/// Entity a tap landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapTarget {
    Hand(HandId),
    Candy(CandyId),
}

/// A single tap from the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapEvent {
    /// `None` when the tap hit empty space
    pub target: Option<TapTarget>,
}

impl TapEvent {
    pub fn hand(index: usize) -> Self {
        Self {
            target: Some(TapTarget::Hand(HandId(index))),
        }
    }

    pub fn candy(index: usize) -> Self {
        Self {
            target: Some(TapTarget::Candy(CandyId(index))),
        }
    }

    pub fn miss() -> Self {
        Self::default()
    }
}

/// Outcome of a tap that hit a hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapHit {
    pub hand: HandId,
    pub health: i32,
    /// This tap triggered the speed boost
    pub boosted: bool,
}

/// Damage the tapped hand. Taps on nothing, on candies or on unknown hands
/// are ignored.
pub fn resolve_tap(state: &mut GameState, tap: &TapEvent, tuning: &Tuning) -> Option<TapHit> {
    let Some(TapTarget::Hand(id)) = tap.target else {
        return None;
    };

    let hand = state.hand_mut(id)?;
    let boosted = hand.handle_tap(tuning);
    Some(TapHit {
        hand: id,
        health: hand.health,
        boosted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawned_state(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(tuning);
        state.spawn_entities(tuning);
        state
    }

    #[test]
    fn test_tap_hits_hand() {
        let tuning = Tuning::default();
        let mut state = spawned_state(&tuning);

        let hit = resolve_tap(&mut state, &TapEvent::hand(0), &tuning).unwrap();
        assert_eq!(hit.hand, HandId(0));
        assert_eq!(hit.health, tuning.hand_start_health - 1);
        assert!(!hit.boosted);
        assert_eq!(state.hands[1].health, tuning.hand_start_health);
    }

    #[test]
    fn test_tap_on_candy_or_nothing_ignored() {
        let tuning = Tuning::default();
        let mut state = spawned_state(&tuning);
        let before = state.clone();

        assert!(resolve_tap(&mut state, &TapEvent::candy(0), &tuning).is_none());
        assert!(resolve_tap(&mut state, &TapEvent::miss(), &tuning).is_none());
        assert!(resolve_tap(&mut state, &TapEvent::hand(9), &tuning).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_tap_reports_boost() {
        let tuning = Tuning::default();
        let mut state = spawned_state(&tuning);
        state.hands[2].health = tuning.boost_health + 1;

        let hit = resolve_tap(&mut state, &TapEvent::hand(2), &tuning).unwrap();
        assert!(hit.boosted);
        assert_eq!(hit.health, tuning.boost_health);
    }
}
