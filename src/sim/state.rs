//! Game state and core entity types
//!
//! Everything the simulation mutates lives here. Hands and candies are created
//! once when the scene anchor is ready and reused across games via `reset`.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of the game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the player to press start
    #[default]
    Start,
    /// Hands are rising and the countdown is running
    InProgress,
    /// Countdown ran out with at least one candy left
    Win,
    /// Every candy was caught
    Lose,
}

impl GamePhase {
    /// Status label shown by the HUD
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "START",
            GamePhase::InProgress => "IN PROGRESS",
            GamePhase::Win => "WIN",
            GamePhase::Lose => "LOSE",
        }
    }

    /// Screen message for the phase
    pub fn message(&self) -> &'static str {
        match self {
            GamePhase::Start => {
                "Protect your candy before time runs!\nTap the monsters to keep them at bay.\nIf you lose all your sweets, it's game over!"
            }
            GamePhase::InProgress => "Time Left:",
            GamePhase::Win => "You kept your candy safe from the monsters!\nGood job!",
            GamePhase::Lose => "You lost your candy to the monsters!",
        }
    }

    /// Win and Lose wait for a restart
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::Win | GamePhase::Lose)
    }
}

/// Stable handle of a hand, equal to its pair index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandId(pub usize);

impl HandId {
    pub fn index(self) -> usize {
        self.0
    }

    /// The candy this hand is allowed to catch
    pub fn paired_candy(self) -> CandyId {
        CandyId(self.0)
    }

    /// Scene entity name handed to the renderer
    pub fn entity_name(self) -> String {
        format!("hand-{}", self.0)
    }
}

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hand-{}", self.0)
    }
}

/// Stable handle of a candy, equal to its pair index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandyId(pub usize);

impl CandyId {
    pub fn index(self) -> usize {
        self.0
    }

    /// Scene entity name handed to the renderer
    pub fn entity_name(self) -> String {
        format!("candy-{}", self.0)
    }
}

impl fmt::Display for CandyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "candy-{}", self.0)
    }
}

/// A hand entity rising toward its candy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub id: HandId,
    /// Remaining health, may go negative
    pub health: i32,
    /// Offset gained per accepted update
    pub speed: f32,
    /// Vertical progress toward the candy
    pub offset: f32,
    /// Horizontal slot on the anchor
    pub slot_x: f32,
    /// Speed boost already applied this life
    boosted: bool,
}

impl Hand {
    pub fn new(id: HandId, tuning: &Tuning) -> Self {
        Self {
            id,
            health: tuning.hand_start_health,
            speed: tuning.hand_base_speed,
            offset: tuning.hand_start_offset,
            slot_x: tuning.entity_spacing * id.index() as f32,
            boosted: false,
        }
    }

    /// Restore health, speed and offset without recreating the entity
    pub fn reset(&mut self, tuning: &Tuning) {
        self.health = tuning.hand_start_health;
        self.speed = tuning.hand_base_speed;
        self.offset = tuning.hand_start_offset;
        self.boosted = false;
    }

    /// Move one step toward the candy
    pub fn advance(&mut self) {
        self.offset += self.speed;
    }

    /// Apply one tap: damage, knockback and the one-shot speed boost.
    ///
    /// Returns true if this tap triggered the boost.
    pub fn handle_tap(&mut self, tuning: &Tuning) -> bool {
        self.health -= 1;
        self.offset -= tuning.hand_knockback;

        if self.health <= tuning.boost_health && !self.boosted {
            self.speed *= tuning.boost_factor;
            self.boosted = true;
            return true;
        }
        false
    }

    pub fn is_boosted(&self) -> bool {
        self.boosted
    }

    /// Position relative to the scene anchor
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.slot_x, self.offset, 0.0)
    }
}

/// A candy entity waiting to be eaten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candy {
    pub id: CandyId,
    pub caught: bool,
    /// Inactive candies are hidden and no longer collide
    pub active: bool,
    /// Position relative to the scene anchor
    pub position: Vec3,
}

impl Candy {
    pub fn new(id: CandyId, tuning: &Tuning) -> Self {
        Self {
            id,
            caught: false,
            active: true,
            position: Vec3::new(
                tuning.entity_spacing * id.index() as f32,
                tuning.candy_height,
                0.0,
            ),
        }
    }

    pub fn reset(&mut self) {
        self.caught = false;
        self.active = true;
    }

    /// Mark the candy as eaten. Returns false if it already was.
    pub fn handle_catch(&mut self) -> bool {
        if self.caught {
            return false;
        }
        self.caught = true;
        self.active = false;
        true
    }
}

/// Authoritative game state, owned by the game loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Countdown value, only meaningful while in progress
    pub seconds_remaining: u32,
    /// Hands sorted by id
    pub hands: Vec<Hand>,
    /// Candies sorted by id, paired with `hands` by index
    pub candies: Vec<Candy>,
}

impl GameState {
    /// Create an empty state; entities are spawned once the anchor is ready
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Start,
            seconds_remaining: tuning.timer_length,
            hands: Vec::new(),
            candies: Vec::new(),
        }
    }

    /// Spawn `tuning.entity_count` hand/candy pairs
    pub fn spawn_entities(&mut self, tuning: &Tuning) {
        self.hands = (0..tuning.entity_count)
            .map(|i| Hand::new(HandId(i), tuning))
            .collect();
        self.candies = (0..tuning.entity_count)
            .map(|i| Candy::new(CandyId(i), tuning))
            .collect();
    }

    /// Put every entity and the countdown back to initial values
    pub fn reset(&mut self, tuning: &Tuning) {
        self.seconds_remaining = tuning.timer_length;
        for hand in &mut self.hands {
            hand.reset(tuning);
        }
        for candy in &mut self.candies {
            candy.reset();
        }
    }

    pub fn hand(&self, id: HandId) -> Option<&Hand> {
        self.hands.get(id.index())
    }

    pub fn hand_mut(&mut self, id: HandId) -> Option<&mut Hand> {
        self.hands.get_mut(id.index())
    }

    pub fn candy_mut(&mut self, id: CandyId) -> Option<&mut Candy> {
        self.candies.get_mut(id.index())
    }

    /// True iff there is at least one candy and every candy is caught.
    ///
    /// Derived from current state on every call.
    pub fn all_candies_caught(&self) -> bool {
        !self.candies.is_empty() && self.candies.iter().all(|c| c.caught)
    }

    pub fn candies_left(&self) -> usize {
        self.candies.iter().filter(|c| !c.caught).count()
    }
}
