//! Render settings and shading policy switches.
//!
//! Settings load from JSON. Every field is optional; missing fields take
//! their defaults.

use std::path::Path;

use glint_math::NormalTransformMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::Color;

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// The frame light positions are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightFrame {
    /// Positions are transformed by the top of the transform stack at shading time.
    #[default]
    CurrentTransform,
    /// Positions are used as given, in the same space as submitted geometry.
    World,
}

/// Which lights feed the ambient term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbientSource {
    /// Only the first light's ambient color is used.
    #[default]
    FirstLight,
    /// Ambient colors of all lights are summed.
    AllLights,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub normal_transform: NormalTransformMode,
    pub light_frame: LightFrame,
    pub ambient_source: AmbientSource,
    /// Scalar applied to every diffuse term
    pub light_intensity: f32,
    /// Report progress after every row that is a multiple of this
    pub checkpoint_interval: u32,
    /// Color returned by rays that miss all geometry
    pub background: Color,
    /// Upper bound on primary-ray hit distance
    pub max_distance: f32,
}

/// Diffuse light intensity applied when no setting overrides it.
pub const DEFAULT_LIGHT_INTENSITY: f32 = 0.7;

/// Rows between progress checkpoints.
pub const DEFAULT_CHECKPOINT_INTERVAL: u32 = 50;

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            normal_transform: NormalTransformMode::default(),
            light_frame: LightFrame::default(),
            ambient_source: AmbientSource::default(),
            light_intensity: DEFAULT_LIGHT_INTENSITY,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            background: Color::ZERO,
            max_distance: 1e20,
        }
    }
}

impl RenderSettings {
    /// Parse and validate settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: RenderSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::debug!("Loaded render settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    /// Check value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checkpoint_interval == 0 {
            return Err(ConfigError::Invalid {
                field: "checkpoint_interval",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.light_intensity.is_finite() || self.light_intensity < 0.0 {
            return Err(ConfigError::Invalid {
                field: "light_intensity",
                reason: format!("must be a non-negative number, got {}", self.light_intensity),
            });
        }
        if self.max_distance.is_nan() || self.max_distance <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "max_distance",
                reason: format!("must be positive, got {}", self.max_distance),
            });
        }
        if self.background.min_element() < 0.0 {
            return Err(ConfigError::Invalid {
                field: "background",
                reason: "channels must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}
