//! Setup errors
//!
//! Gameplay itself has no recoverable errors; out-of-order events are
//! ignored. Only scene and tuning setup can fail, and those failures are fatal.

use thiserror::Error;

/// Fatal configuration error reported before any gameplay begins
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("tracking image `{0}` is not available")]
    MissingTrackingTarget(String),

    #[error("tracking image `{image}` has invalid physical width {width}")]
    InvalidTargetWidth { image: String, width: f32 },

    #[error("model asset `{0}` is not available")]
    MissingAsset(String),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse tuning: {0}")]
    TuningParse(#[from] serde_json::Error),
}
