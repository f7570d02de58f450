//! Platform abstraction layer
//!
//! Handles the host side of the game loop:
//! - Countdown ticks on a background task
//! - Serialized access to the game from frame, input and timer sources
//! - Forwarding game events to the UI layer

pub mod host;

pub use host::GameHost;
