//! Glint Renderer - Whitted-style CPU ray tracing.
//!
//! Turns a camera, point lights and a stream of transformed polygons into an
//! RGB8 image: one primary ray per pixel, Blinn-Phong shading with hard
//! shadows, and optional texture modulation.
//!
//! The pipeline, leaves first:
//! - [`TransformStack`] places geometry into view space
//! - [`SceneSubmitter`] bakes the transform into primitives for an [`IntersectionEngine`]
//! - [`ShadingEvaluator`] shades one ray
//! - [`ImageSampler`] shoots one ray per pixel into a [`Framebuffer`]
//!
//! [`RaytraceRenderer`] ties them into a single lifecycle.

mod framebuffer;
pub mod intersection;
mod polygon;
mod polygon_scene;
mod renderer;
mod sampler;
mod shading;
mod submitter;
mod transform_stack;

pub use framebuffer::{quantize, Framebuffer};
pub use intersection::{Hit, IntersectionEngine, ObjectId, SceneBuilder, SurfaceInfo};
pub use polygon_scene::{PolygonScene, PolygonSceneBuilder};
pub use renderer::RaytraceRenderer;
pub use sampler::{is_checkpoint, Checkpoint, ImageSampler, LogProgress, NoProgress, RenderProgress};
pub use shading::ShadingEvaluator;
pub use submitter::{PolygonRecord, SceneSubmitter};
pub use transform_stack::TransformStack;

/// Re-export scene inputs and math types
pub use glint_core::{Camera, Color, Light, Material, RenderSettings, Texture};
pub use glint_math::{Mat4, Ray, Vec2, Vec3};
