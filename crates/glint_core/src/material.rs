//! Surface materials for Blinn-Phong shading.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// A Blinn-Phong material: per-channel ambient, diffuse and specular
/// reflectance plus a specular exponent.
///
/// Materials are immutable while rendering; polygons hold them by `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Material name (for logs only)
    pub name: String,

    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,

    /// Specular exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Color::splat(0.2),
            diffuse: Color::splat(0.8),
            specular: Color::ZERO,
            shininess: 1.0,
        }
    }
}

impl Material {
    /// Create a new material with just a name and diffuse color.
    ///
    /// Ambient reflectance follows the diffuse color at a quarter strength.
    pub fn new(name: impl Into<String>, diffuse: Color) -> Self {
        Self {
            name: name.into(),
            ambient: diffuse * 0.25,
            diffuse,
            ..Default::default()
        }
    }

    /// Set the ambient reflectance.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set the specular reflectance and exponent.
    pub fn with_specular(mut self, specular: Color, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }
}
