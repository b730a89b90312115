use glint_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::material::Color;

/// A point light with separate ambient, diffuse and specular colors.
///
/// Which frame `position` is expressed in depends on
/// [`LightFrame`](crate::config::LightFrame).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl Light {
    /// Create a white light at `position` with a dim ambient term.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffuse(mut self, diffuse: Color) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            ambient: Color::splat(0.1),
            diffuse: Color::ONE,
            specular: Color::ONE,
        }
    }
}
