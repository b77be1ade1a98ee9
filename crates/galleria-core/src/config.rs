//! Gallery configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, GalleryResult};

/// Scale applied to a slide when zoom is toggled on.
pub const DEFAULT_ZOOM_SCALE: f64 = 2.2;
/// Largest absolute pan offset, in percent of the image box.
pub const DEFAULT_PAN_LIMIT: f64 = 100.0;
/// Degrees added or removed by a single rotation.
pub const DEFAULT_ROTATION_STEP: i32 = 90;
/// Maximum interval between two presses of a double click.
pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 500;
/// Maximum pointer travel between two presses of a double click.
pub const DEFAULT_DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tunables for a [`Gallery`](crate::Gallery).
///
/// Every field has a default, so a partial JSON object such as
/// `{"zoom_scale": 3.0}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Scale of a zoomed slide.
    pub zoom_scale: f64,
    /// Pan clamp, applied to both axes as `[-pan_limit, pan_limit]`.
    pub pan_limit: f64,
    /// Rotation increment in degrees, non-zero and at most a full turn.
    pub rotation_step: i32,
    /// Pan percent per pointer pixel.
    pub pan_sensitivity: f64,
    /// Double click time window in milliseconds.
    pub double_click_ms: u64,
    /// Double click distance tolerance in pixels.
    pub double_click_distance: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            zoom_scale: DEFAULT_ZOOM_SCALE,
            pan_limit: DEFAULT_PAN_LIMIT,
            rotation_step: DEFAULT_ROTATION_STEP,
            pan_sensitivity: 1.0,
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
            double_click_distance: DEFAULT_DOUBLE_CLICK_DISTANCE,
        }
    }
}

impl GalleryConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> GalleryResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> GalleryResult<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(GalleryError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )))
            }
        };

        positive("zoom_scale", self.zoom_scale)?;
        positive("pan_limit", self.pan_limit)?;
        positive("pan_sensitivity", self.pan_sensitivity)?;
        if !self.double_click_distance.is_finite() || self.double_click_distance < 0.0 {
            return Err(GalleryError::InvalidConfig(format!(
                "double_click_distance must be non-negative, got {}",
                self.double_click_distance
            )));
        }
        if self.rotation_step == 0 || self.rotation_step.unsigned_abs() > 360 {
            return Err(GalleryError::InvalidConfig(format!(
                "rotation_step must be non-zero and within 360 degrees, got {}",
                self.rotation_step
            )));
        }
        Ok(())
    }
}
