//! Per-frame hand animation
//!
//! Frames arrive at whatever rate the renderer manages. Hands move at a
//! fixed cadence: a frame is accepted only if more than the update interval
//! has passed since the last accepted one. Frames inside the window are
//! dropped, not queued.

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// A rendered frame, stamped with host time in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTick {
    pub time: f64,
}

impl FrameTick {
    pub fn at(time: f64) -> Self {
        Self { time }
    }
}

/// Drops frames that arrive faster than the update cadence
#[derive(Debug, Clone, Default)]
pub struct UpdateThrottle {
    last_update: Option<f64>,
}

impl UpdateThrottle {
    /// Forget the reference point; the next frame is accepted
    pub fn clear(&mut self) {
        self.last_update = None;
    }

    /// Whether the frame at `time` should advance the simulation.
    ///
    /// Non-finite times are dropped. A time before the reference point means
    /// the host clock jumped back: the frame is dropped and becomes the new
    /// reference.
    pub fn accept(&mut self, time: f64, interval: f64) -> bool {
        if !time.is_finite() {
            return false;
        }
        let due = match self.last_update {
            None => true,
            Some(last) if time < last => {
                self.last_update = Some(time);
                return false;
            }
            Some(last) => time - last > interval,
        };
        if due {
            self.last_update = Some(time);
        }
        due
    }
}

/// Move every hand one step toward its candy
pub fn advance_hands(state: &mut GameState) {
    for hand in &mut state.hands {
        hand.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    const INTERVAL: f64 = 1.0 / 30.0;

    #[test]
    fn test_throttle_drops_fast_frames() {
        let mut throttle = UpdateThrottle::default();

        assert!(throttle.accept(0.0, INTERVAL));
        // 120 Hz frames inside the window
        assert!(!throttle.accept(1.0 / 120.0, INTERVAL));
        assert!(!throttle.accept(2.0 / 120.0, INTERVAL));
        assert!(!throttle.accept(3.0 / 120.0, INTERVAL));
        // Past the window
        assert!(throttle.accept(0.04, INTERVAL));
        assert!(!throttle.accept(0.05, INTERVAL));
    }

    #[test]
    fn test_throttle_clear() {
        let mut throttle = UpdateThrottle::default();
        assert!(throttle.accept(5.0, INTERVAL));
        assert!(!throttle.accept(5.01, INTERVAL));

        throttle.clear();
        assert!(throttle.accept(5.02, INTERVAL));
    }

    #[test]
    fn test_time_going_backwards_reanchors() {
        let mut throttle = UpdateThrottle::default();
        assert!(throttle.accept(10.0, INTERVAL));
        assert!(!throttle.accept(2.0, INTERVAL));
        // Cadence resumes from the new reference, not from t=10
        assert!(!throttle.accept(2.02, INTERVAL));
        assert!(throttle.accept(2.04, INTERVAL));
    }

    #[test]
    fn test_non_finite_time_is_dropped() {
        let mut throttle = UpdateThrottle::default();
        assert!(!throttle.accept(f64::NAN, INTERVAL));
        assert!(throttle.accept(0.0, INTERVAL));

        assert!(!throttle.accept(f64::NAN, INTERVAL));
        assert!(!throttle.accept(f64::INFINITY, INTERVAL));
        assert!(throttle.accept(1.0, INTERVAL));
        assert!(throttle.accept(2.0, INTERVAL));
    }

    #[test]
    fn test_advance_hands_uses_each_speed() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.spawn_entities(&tuning);
        state.hands[1].speed *= 1.5;
        let before: Vec<f32> = state.hands.iter().map(|h| h.offset).collect();

        advance_hands(&mut state);

        for (hand, start) in state.hands.iter().zip(before) {
            assert_eq!(hand.offset, start + hand.speed);
        }
    }
}
