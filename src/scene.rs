//! Scene setup contract
//!
//! Image tracking, model loading and rendering belong to the host. The core
//! only checks that everything it depends on is available and hands back the
//! tracking target the host should look for.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Identity of the tracked anchor the entities are attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorId(pub u64);

/// Asset lookup provided by the host
pub trait AssetCatalog {
    /// Whether a named image or model can be loaded
    fn contains(&self, name: &str) -> bool;
}

impl AssetCatalog for [&str] {
    fn contains(&self, name: &str) -> bool {
        self.iter().any(|n| *n == name)
    }
}

impl AssetCatalog for HashSet<String> {
    fn contains(&self, name: &str) -> bool {
        HashSet::contains(self, name)
    }
}

/// Tracking image the host should register with its tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingTarget {
    pub image: String,
    /// Printed width of the image in meters
    pub physical_width: f32,
}

/// Assets the scene needs before play can start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub target_image: String,
    pub physical_width: f32,
    pub hand_model: String,
    pub candy_model: String,
    pub backdrop_model: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            target_image: "bed2.png".into(),
            physical_width: 0.1524,
            hand_model: "orc-hand.usdz".into(),
            candy_model: "gumdrop.usdz".into(),
            backdrop_model: "plane.usda".into(),
        }
    }
}

impl SceneConfig {
    /// Model assets in load order
    pub fn models(&self) -> [&str; 3] {
        [
            self.backdrop_model.as_str(),
            self.hand_model.as_str(),
            self.candy_model.as_str(),
        ]
    }

    /// Check every required asset against the host catalog
    pub fn validate<C>(&self, catalog: &C) -> Result<TrackingTarget, SetupError>
    where
        C: AssetCatalog + ?Sized,
    {
        if !catalog.contains(&self.target_image) {
            log::error!("Error loading target image {}", self.target_image);
            return Err(SetupError::MissingTrackingTarget(self.target_image.clone()));
        }
        if !(self.physical_width.is_finite() && self.physical_width > 0.0) {
            log::error!(
                "Target image {} has unusable width {}",
                self.target_image,
                self.physical_width
            );
            return Err(SetupError::InvalidTargetWidth {
                image: self.target_image.clone(),
                width: self.physical_width,
            });
        }
        if let Some(missing) = self.models().into_iter().find(|m| !catalog.contains(m)) {
            log::error!("Error loading model {}", missing);
            return Err(SetupError::MissingAsset(missing.to_string()));
        }

        Ok(TrackingTarget {
            image: self.target_image.clone(),
            physical_width: self.physical_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: [&str; 4] = ["bed2.png", "orc-hand.usdz", "gumdrop.usdz", "plane.usda"];

    #[test]
    fn test_complete_bundle_validates() {
        let target = SceneConfig::default().validate(&BUNDLE[..]).unwrap();
        assert_eq!(target.image, "bed2.png");
        assert!((target.physical_width - 0.1524).abs() < 1e-6);
    }

    #[test]
    fn test_missing_target_image() {
        let config = SceneConfig {
            target_image: "poster.png".into(),
            ..Default::default()
        };
        let err = config.validate(&BUNDLE[..]).unwrap_err();
        assert!(matches!(err, SetupError::MissingTrackingTarget(ref name) if name == "poster.png"));
    }

    #[test]
    fn test_missing_model() {
        let catalog: HashSet<String> = ["bed2.png", "plane.usda", "gumdrop.usdz"]
            .into_iter()
            .map(String::from)
            .collect();
        let err = SceneConfig::default().validate(&catalog).unwrap_err();
        assert!(matches!(err, SetupError::MissingAsset(ref name) if name == "orc-hand.usdz"));
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = SceneConfig {
            physical_width: 0.0,
            ..Default::default()
        };
        let err = config.validate(&BUNDLE[..]).unwrap_err();
        assert!(matches!(err, SetupError::InvalidTargetWidth { .. }));
    }
}
