//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only comes in through event payloads
//! - Stable iteration order (by entity id)
//! - No rendering, tracking or platform dependencies

pub mod collision;
pub mod game;
pub mod input;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{CollisionEvent, resolve_collision};
pub use game::{Game, GameEvent, Hud, UiSignal};
pub use input::{TapEvent, TapHit, TapTarget, resolve_tap};
pub use state::{Candy, CandyId, GamePhase, GameState, Hand, HandId};
pub use tick::{FrameTick, UpdateThrottle, advance_hands};
pub use timer::{CountdownTimer, TimerSession, TimerTick};
