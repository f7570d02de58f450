//! Monsters Under the Bed - an image-anchored AR candy defense game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hands, candies, countdown, game state)
//! - `platform`: Host-side drivers (countdown ticker, shared game handle)
//! - `scene`: Tracking target and asset requirements
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod platform;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use error::SetupError;
pub use scene::{AnchorId, AssetCatalog, SceneConfig, TrackingTarget};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Countdown length in seconds
    pub const TIMER_LENGTH: u32 = 15;
    /// Countdown tick period in seconds
    pub const TIMER_PERIOD_SECS: f64 = 1.0;
    /// Number of hand/candy pairs
    pub const ENEMY_COUNT: usize = 3;

    /// Hands move at most 30 times per second
    pub const HAND_UPDATE_INTERVAL: f64 = 1.0 / 30.0;
    /// Health at the start of every life
    pub const HAND_START_HEALTH: i32 = 10;
    /// Rise per update (meters)
    pub const HAND_BASE_SPEED: f32 = 0.0025;
    /// Starting height above the anchor (meters)
    pub const HAND_START_OFFSET: f32 = 0.00015;
    /// Push back per tap (meters)
    pub const HAND_KNOCKBACK: f32 = 0.1;
    /// Hands speed up once health drops to this
    pub const HAND_BOOST_HEALTH: i32 = 3;
    pub const HAND_BOOST_FACTOR: f32 = 1.5;

    /// Scene layout (meters)
    pub const ENTITY_SPACING: f32 = 0.035;
    pub const CANDY_HEIGHT: f32 = 0.30;
}
