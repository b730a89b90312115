//! Bakes modeling transforms into primitives for the intersection engine.

use std::sync::Arc;

use glint_core::{Material, Texture};
use glint_math::{Mat4, Mat4Ext, NormalTransformMode, Vec2, Vec3};

use crate::intersection::SceneBuilder;

/// A finished polygon in model space, as produced by an upstream geometry builder.
///
/// `normals` and `texcoords` are either empty or hold one entry per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonRecord {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
}

impl PolygonRecord {
    /// A polygon with vertices only.
    pub fn new(vertices: Vec<Vec3>) -> Self {
        Self {
            vertices,
            ..Default::default()
        }
    }

    /// Attach per-vertex normals.
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = normals;
        self
    }

    /// Attach per-vertex texture coordinates.
    pub fn with_texcoords(mut self, texcoords: Vec<Vec2>) -> Self {
        self.texcoords = texcoords;
        self
    }
}

/// Streams transformed polygons into a [`SceneBuilder`].
pub struct SceneSubmitter<B: SceneBuilder> {
    builder: B,
    normal_mode: NormalTransformMode,
    submitted: usize,
}

impl<B: SceneBuilder> SceneSubmitter<B> {
    /// Wrap an engine builder. The builder is reset to an empty scene.
    pub fn new(mut builder: B, normal_mode: NormalTransformMode) -> Self {
        builder.initialize();
        Self {
            builder,
            normal_mode,
            submitted: 0,
        }
    }

    /// Open a primitive with its material and optional texture.
    pub fn begin_polygon(&mut self, material: Option<Arc<Material>>, texture: Option<Arc<Texture>>) {
        self.builder.begin_polygon();
        self.builder.set_material(material);
        if let Some(texture) = texture {
            self.builder.set_texture(texture);
        }
    }

    /// Forward one vertex with its optional attributes.
    ///
    /// The vertex receives the full affine `transform`; the normal only its
    /// linear part, per the configured [`NormalTransformMode`].
    pub fn attach(&mut self, transform: &Mat4, vertex: Vec3, normal: Option<Vec3>, texcoord: Option<Vec2>) {
        if let Some(normal) = normal {
            self.builder.add_normal(transform.transform_normal(normal, self.normal_mode));
        }
        if let Some(uv) = texcoord {
            self.builder.add_tex_vertex(uv);
        }
        self.builder.add_vertex(transform.transform_point3(vertex));
    }

    /// Close the open primitive.
    pub fn end_polygon(&mut self) {
        self.builder.end_polygon();
        self.submitted += 1;
    }

    /// Submit a whole polygon under `transform`.
    ///
    /// Normals and texcoords are attached only while their lists still have
    /// entries, so a missing list just skips that attribute.
    pub fn submit(
        &mut self,
        transform: &Mat4,
        polygon: &PolygonRecord,
        material: Option<Arc<Material>>,
        texture: Option<Arc<Texture>>,
    ) {
        if polygon.vertices.is_empty() {
            log::debug!("Submitting an empty polygon");
        }

        self.begin_polygon(material, texture);

        let mut normals = polygon.normals.iter();
        let mut texcoords = polygon.texcoords.iter();
        for vertex in &polygon.vertices {
            self.attach(transform, *vertex, normals.next().copied(), texcoords.next().copied());
        }

        self.end_polygon();
    }

    /// Number of polygons submitted so far.
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Seal the scene and hand back the queryable engine.
    pub fn finish(self) -> B::Scene {
        log::debug!("Submission complete: {} polygons", self.submitted);
        self.builder.loading_complete()
    }
}
