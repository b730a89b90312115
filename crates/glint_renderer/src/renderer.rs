use std::sync::Arc;
use std::time::Instant;

use glint_core::{Camera, Light, Material, RenderSettings, Texture};
use glint_math::Vec3;

use crate::framebuffer::Framebuffer;
use crate::intersection::{IntersectionEngine, SceneBuilder};
use crate::polygon_scene::PolygonSceneBuilder;
use crate::sampler::{ImageSampler, RenderProgress};
use crate::shading::ShadingEvaluator;
use crate::submitter::{PolygonRecord, SceneSubmitter};
use crate::transform_stack::TransformStack;

/// One render: modeling calls feed the scene, then `render` seals it and
/// produces the image.
pub struct RaytraceRenderer<B: SceneBuilder = PolygonSceneBuilder> {
    camera: Camera,
    settings: RenderSettings,
    stack: TransformStack,
    submitter: SceneSubmitter<B>,
    material: Option<Arc<Material>>,
}

impl RaytraceRenderer<PolygonSceneBuilder> {
    /// Start a render with the built-in polygon engine.
    pub fn new(camera: Camera, settings: RenderSettings) -> Self {
        Self::start(PolygonSceneBuilder::new(), camera, settings)
    }
}

impl<B: SceneBuilder> RaytraceRenderer<B> {
    /// Initialize the engine builder and seed the stack with the camera's
    /// view transform.
    pub fn start(builder: B, camera: Camera, settings: RenderSettings) -> Self {
        let mut stack = TransformStack::new();
        stack.initialize(camera.eye, camera.center, camera.up);

        Self {
            camera,
            submitter: SceneSubmitter::new(builder, settings.normal_transform),
            settings,
            stack,
            material: None,
        }
    }

    /// Material for subsequent polygons. `None` renders them black.
    pub fn set_material(&mut self, material: Option<Arc<Material>>) {
        self.material = material;
    }

    pub fn push_matrix(&mut self) {
        self.stack.push();
    }

    pub fn pop_matrix(&mut self) {
        self.stack.pop();
    }

    /// Rotate by `angle` degrees around `axis`.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        self.stack.rotate(angle, axis);
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.stack.translate(x, y, z);
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.stack.scale(x, y, z);
    }

    pub fn transform_stack(&self) -> &TransformStack {
        &self.stack
    }

    /// Submit a polygon under the current transform and material.
    pub fn polygon(&mut self, polygon: &PolygonRecord, texture: Option<Arc<Texture>>) {
        let transform = self.stack.current();
        self.submitter
            .submit(&transform, polygon, self.material.clone(), texture);
    }

    /// Seal the scene and shade one ray per pixel.
    ///
    /// Lights are resolved against the transform on top of the stack now.
    pub fn render(self, lights: &[Light], progress: &mut dyn RenderProgress) -> Framebuffer {
        if self.stack.depth() > 1 {
            log::warn!(
                "Rendering with {} unpopped transform(s)",
                self.stack.depth() - 1
            );
        }

        let light_transform = self.stack.current();
        let scene = self.submitter.finish();

        log::info!(
            "Rendering {}x{}: {} objects, {} lights",
            self.camera.image_width,
            self.camera.image_height,
            scene.object_count(),
            lights.len()
        );
        let start = Instant::now();

        let evaluator = ShadingEvaluator::new(&scene, lights, light_transform, &self.settings);
        let sampler = ImageSampler::new(&self.camera, self.settings.checkpoint_interval);
        let image = sampler.render(|ray| evaluator.shade(ray), progress);

        log::info!("Render complete in {:.2?}", start.elapsed());

        image
    }
}
