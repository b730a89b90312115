//! Glint Core - Scene inputs for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene inputs**: `Camera`, `Light`, `Material`, `Texture`
//! - **Settings**: `RenderSettings` and the shading policy switches, loadable from JSON
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Camera, RenderSettings};
//!
//! let settings = RenderSettings::load("settings.json")?;
//! let camera = Camera::new(Vec3::new(0.0, 2.0, 8.0), Vec3::ZERO, Vec3::Y)
//!     .with_resolution(640, 480);
//! ```

pub mod camera;
pub mod config;
pub mod light;
pub mod material;
pub mod texture;

// Re-export commonly used types
pub use camera::Camera;
pub use config::{AmbientSource, ConfigError, LightFrame, RenderSettings};
pub use glint_math::NormalTransformMode;
pub use light::Light;
pub use material::{Color, Material};
pub use texture::{Texture, TextureError, TextureResult};
