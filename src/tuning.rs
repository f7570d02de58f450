//! Game balance values
//!
//! Defaults come from `consts`. A host may ship a JSON override; missing
//! fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SetupError;

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Countdown length in seconds
    pub timer_length: u32,
    /// Number of hand/candy pairs
    pub entity_count: usize,

    // === Hands ===
    /// Health at the start of every life
    pub hand_start_health: i32,
    /// Offset gained per accepted update
    pub hand_base_speed: f32,
    /// Offset at the start of every life
    pub hand_start_offset: f32,
    /// Offset lost per tap
    pub hand_knockback: f32,
    /// Minimum host time between hand updates (seconds)
    pub hand_update_interval: f64,
    /// Health at or below which the speed boost kicks in
    pub boost_health: i32,
    /// Speed multiplier of the boost
    pub boost_factor: f32,

    // === Layout ===
    /// Horizontal distance between pairs
    pub entity_spacing: f32,
    /// Height of the candies above the anchor
    pub candy_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            timer_length: TIMER_LENGTH,
            entity_count: ENEMY_COUNT,

            hand_start_health: HAND_START_HEALTH,
            hand_base_speed: HAND_BASE_SPEED,
            hand_start_offset: HAND_START_OFFSET,
            hand_knockback: HAND_KNOCKBACK,
            hand_update_interval: HAND_UPDATE_INTERVAL,
            boost_health: HAND_BOOST_HEALTH,
            boost_factor: HAND_BOOST_FACTOR,

            entity_spacing: ENTITY_SPACING,
            candy_height: CANDY_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.timer_length == 0 {
            return Err(SetupError::InvalidTuning(
                "timer_length must be at least 1".into(),
            ));
        }
        if self.entity_count == 0 {
            return Err(SetupError::InvalidTuning(
                "entity_count must be at least 1".into(),
            ));
        }
        if !(self.hand_base_speed.is_finite() && self.hand_base_speed > 0.0) {
            return Err(SetupError::InvalidTuning(format!(
                "hand_base_speed must be positive, got {}",
                self.hand_base_speed
            )));
        }
        for (name, value) in [
            ("hand_start_offset", self.hand_start_offset),
            ("entity_spacing", self.entity_spacing),
            ("candy_height", self.candy_height),
        ] {
            if !value.is_finite() {
                return Err(SetupError::InvalidTuning(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if !(self.hand_knockback.is_finite() && self.hand_knockback >= 0.0) {
            return Err(SetupError::InvalidTuning(format!(
                "hand_knockback must not be negative, got {}",
                self.hand_knockback
            )));
        }
        if !(self.hand_update_interval.is_finite() && self.hand_update_interval >= 0.0) {
            return Err(SetupError::InvalidTuning(format!(
                "hand_update_interval must not be negative, got {}",
                self.hand_update_interval
            )));
        }
        if !(self.boost_factor.is_finite() && self.boost_factor >= 1.0) {
            return Err(SetupError::InvalidTuning(format!(
                "boost_factor must be at least 1.0, got {}",
                self.boost_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.timer_length, 15);
        assert_eq!(tuning.entity_count, 3);
        assert_eq!(tuning.hand_start_health, 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "timer_length": 30 }"#).unwrap();
        assert_eq!(tuning.timer_length, 30);
        assert_eq!(tuning.entity_count, ENEMY_COUNT);
        assert_eq!(tuning.hand_knockback, HAND_KNOCKBACK);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "entity_count": 0 }"#).unwrap_err();
        assert!(matches!(err, SetupError::InvalidTuning(_)));

        let err = Tuning::from_json(r#"{ "boost_factor": 0.5 }"#).unwrap_err();
        assert!(matches!(err, SetupError::InvalidTuning(_)));
    }

    #[test]
    fn test_non_finite_layout_rejected() {
        for tuning in [
            Tuning {
                hand_start_offset: f32::NAN,
                ..Default::default()
            },
            Tuning {
                entity_spacing: f32::INFINITY,
                ..Default::default()
            },
            Tuning {
                candy_height: f32::NEG_INFINITY,
                ..Default::default()
            },
        ] {
            assert!(matches!(tuning.validate(), Err(SetupError::InvalidTuning(_))));
        }
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Tuning::from_json("{ timer_length: ").unwrap_err();
        assert!(matches!(err, SetupError::TuningParse(_)));
    }
}
