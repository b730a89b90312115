//! Contract between the renderer and an intersection engine.
//!
//! Building and querying are split across two traits. A [`SceneBuilder`]
//! collects primitives; [`SceneBuilder::loading_complete`] consumes it and
//! hands back the sealed [`IntersectionEngine`]. Queries before sealing and
//! submissions after it are therefore not expressible.

use std::sync::Arc;

use glint_core::{Material, Texture};
use glint_math::{Ray, Vec2, Vec3};

/// Opaque handle to a primitive inside an intersection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Nearest hit found by [`IntersectionEngine::intersect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Primitive that was hit
    pub object: ObjectId,
    /// Ray parameter of the hit
    pub t: f32,
    /// World-space intersection point
    pub point: Vec3,
}

/// Shading inputs resolved at a hit.
#[derive(Debug, Clone)]
pub struct SurfaceInfo {
    /// Surface normal (not necessarily unit length)
    pub normal: Vec3,
    pub material: Option<Arc<Material>>,
    pub texture: Option<Arc<Texture>>,
    pub texcoord: Option<Vec2>,
}

/// Receives primitives one attribute at a time.
///
/// Calls between `begin_polygon` and `end_polygon` describe one primitive.
/// Attribute calls are expected in lockstep with `add_vertex`; keeping
/// them in sync is the caller's responsibility.
pub trait SceneBuilder {
    /// Sealed, queryable form of this scene.
    type Scene: IntersectionEngine;

    /// Reset to an empty scene.
    fn initialize(&mut self);

    /// Open a new primitive.
    fn begin_polygon(&mut self);

    /// Close the open primitive.
    fn end_polygon(&mut self);

    /// Material for the open primitive.
    fn set_material(&mut self, material: Option<Arc<Material>>);

    /// Texture for the open primitive.
    fn set_texture(&mut self, texture: Arc<Texture>);

    fn add_vertex(&mut self, point: Vec3);

    fn add_normal(&mut self, normal: Vec3);

    fn add_tex_vertex(&mut self, uv: Vec2);

    /// Seal the scene for querying.
    fn loading_complete(self) -> Self::Scene;
}

/// Read-only ray queries against a sealed scene.
pub trait IntersectionEngine: Send + Sync {
    /// Find the nearest hit with `t` in `(0, max_distance)`, never reporting `exclude`.
    fn intersect(&self, ray: &Ray, max_distance: f32, exclude: Option<ObjectId>) -> Option<Hit>;

    /// Resolve shading inputs for a hit previously returned by `intersect`.
    fn surface_info(&self, ray: &Ray, object: ObjectId, t: f32) -> SurfaceInfo;

    /// Number of primitives in the scene.
    fn object_count(&self) -> usize;
}
