//! Reference intersection engine: a flat list of polygons.
//!
//! Every query scans all polygons; there is no acceleration structure.

use std::sync::Arc;

use glint_core::{Material, Texture};
use glint_math::{Interval, Ray, Vec2, Vec3};

use crate::intersection::{Hit, IntersectionEngine, ObjectId, SceneBuilder, SurfaceInfo};
use crate::polygon::Polygon;

/// Attributes collected for the polygon currently being built.
#[derive(Default)]
struct PolygonDraft {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    material: Option<Arc<Material>>,
    texture: Option<Arc<Texture>>,
}

impl PolygonDraft {
    fn finish(self) -> Polygon {
        Polygon::new(self.vertices, self.normals, self.texcoords, self.material, self.texture)
    }
}

/// Collects polygons for a [`PolygonScene`].
#[derive(Default)]
pub struct PolygonSceneBuilder {
    polygons: Vec<Polygon>,
    open: Option<PolygonDraft>,
}

impl PolygonSceneBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of finished polygons.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Check if no polygon has been finished yet.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// The open polygon, or `None` after reporting the misplaced call.
    fn draft(&mut self, call: &str) -> Option<&mut PolygonDraft> {
        debug_assert!(self.open.is_some(), "{call} called outside begin_polygon/end_polygon");
        if self.open.is_none() {
            log::warn!("Ignoring {call} outside begin_polygon/end_polygon");
        }
        self.open.as_mut()
    }
}

impl SceneBuilder for PolygonSceneBuilder {
    type Scene = PolygonScene;

    fn initialize(&mut self) {
        self.polygons.clear();
        self.open = None;
    }

    fn begin_polygon(&mut self) {
        debug_assert!(self.open.is_none(), "begin_polygon called while a polygon is open");
        if let Some(draft) = self.open.take() {
            log::warn!("begin_polygon called while a polygon is open, closing it");
            self.polygons.push(draft.finish());
        }
        self.open = Some(PolygonDraft::default());
    }

    fn end_polygon(&mut self) {
        debug_assert!(self.open.is_some(), "end_polygon called without begin_polygon");
        match self.open.take() {
            Some(draft) => self.polygons.push(draft.finish()),
            None => log::warn!("Ignoring end_polygon without begin_polygon"),
        }
    }

    fn set_material(&mut self, material: Option<Arc<Material>>) {
        if let Some(draft) = self.draft("set_material") {
            draft.material = material;
        }
    }

    fn set_texture(&mut self, texture: Arc<Texture>) {
        if let Some(draft) = self.draft("set_texture") {
            draft.texture = Some(texture);
        }
    }

    fn add_vertex(&mut self, point: Vec3) {
        if let Some(draft) = self.draft("add_vertex") {
            draft.vertices.push(point);
        }
    }

    fn add_normal(&mut self, normal: Vec3) {
        if let Some(draft) = self.draft("add_normal") {
            draft.normals.push(normal);
        }
    }

    fn add_tex_vertex(&mut self, uv: Vec2) {
        if let Some(draft) = self.draft("add_tex_vertex") {
            draft.texcoords.push(uv);
        }
    }

    fn loading_complete(mut self) -> PolygonScene {
        debug_assert!(self.open.is_none(), "loading_complete called while a polygon is open");
        if let Some(draft) = self.open.take() {
            log::warn!("loading_complete called while a polygon is open, closing it");
            self.polygons.push(draft.finish());
        }

        let degenerate = self.polygons.iter().filter(|p| p.is_degenerate()).count();
        log::debug!(
            "Sealed scene: {} polygons ({} degenerate)",
            self.polygons.len(),
            degenerate
        );

        PolygonScene {
            polygons: self.polygons,
        }
    }
}

/// A sealed list of world-space polygons.
pub struct PolygonScene {
    polygons: Vec<Polygon>,
}

impl PolygonScene {
    /// Vertices of a polygon, for inspection.
    pub fn polygon_vertices(&self, object: ObjectId) -> Option<&[Vec3]> {
        self.polygons.get(object.0).map(|p| p.vertices())
    }
}

impl IntersectionEngine for PolygonScene {
    fn intersect(&self, ray: &Ray, max_distance: f32, exclude: Option<ObjectId>) -> Option<Hit> {
        let mut closest = Interval::positive(max_distance);
        let mut result = None;

        for (index, polygon) in self.polygons.iter().enumerate() {
            let object = ObjectId(index);
            if exclude == Some(object) {
                continue;
            }

            if let Some(hit) = polygon.hit(ray, closest) {
                closest = closest.shrink_to(hit.t);
                result = Some(Hit {
                    object,
                    t: hit.t,
                    point: ray.at(hit.t),
                });
            }
        }

        result
    }

    fn surface_info(&self, ray: &Ray, object: ObjectId, t: f32) -> SurfaceInfo {
        let Some(polygon) = self.polygons.get(object.0) else {
            log::warn!("surface_info for unknown object {:?}", object);
            return SurfaceInfo {
                normal: Vec3::ZERO,
                material: None,
                texture: None,
                texcoord: None,
            };
        };

        let (normal, texcoord) = polygon.surface_at(ray.at(t));

        SurfaceInfo {
            normal,
            material: polygon.material().cloned(),
            texture: polygon.texture().cloned(),
            texcoord,
        }
    }

    fn object_count(&self) -> usize {
        self.polygons.len()
    }
}
