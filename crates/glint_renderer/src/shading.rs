//! Local Blinn-Phong shading with hard shadows.
//!
//! One primary hit, one shadow feeler per light, no recursion.

use glint_core::{AmbientSource, Color, Light, LightFrame, Material, RenderSettings};
use glint_math::{Mat4, Ray, Vec3};

use crate::intersection::{Hit, IntersectionEngine};

/// Shades rays against a sealed scene.
pub struct ShadingEvaluator<'a, E: IntersectionEngine + ?Sized> {
    engine: &'a E,
    lights: &'a [Light],
    /// Applied to light positions under `LightFrame::CurrentTransform`
    light_transform: Mat4,
    settings: &'a RenderSettings,
}

impl<'a, E: IntersectionEngine + ?Sized> ShadingEvaluator<'a, E> {
    pub fn new(
        engine: &'a E,
        lights: &'a [Light],
        light_transform: Mat4,
        settings: &'a RenderSettings,
    ) -> Self {
        Self {
            engine,
            lights,
            light_transform,
            settings,
        }
    }

    /// Compute the color seen by a ray.
    ///
    /// The result is non-negative but not clamped; quantization happens when
    /// the framebuffer is written.
    pub fn shade(&self, ray: &Ray) -> Color {
        let Some(hit) = self.engine.intersect(ray, self.settings.max_distance, None) else {
            return self.settings.background;
        };

        let surface = self.engine.surface_info(ray, hit.object, hit.t);
        let Some(material) = surface.material.as_deref() else {
            return Color::ZERO;
        };

        // Normal always points against the ray
        let mut normal = surface.normal.normalize_or_zero();
        if normal.dot(ray.direction()) > 0.0 {
            normal = -normal;
        }

        let texture_factor = match (&surface.texture, surface.texcoord) {
            (Some(texture), Some(uv)) => texture.modulation(uv),
            _ => 1.0,
        };

        let mut color = self.ambient_light() * material.ambient * texture_factor;

        let view = (ray.origin() - hit.point).normalize_or_zero();
        for light in self.lights {
            let position = self.light_position(light);
            if self.in_shadow(&hit, position) {
                continue;
            }

            color += self.direct_light(light, material, normal, view, position - hit.point, texture_factor);
        }

        color
    }

    /// Diffuse plus specular contribution of one unoccluded light.
    fn direct_light(
        &self,
        light: &Light,
        material: &Material,
        normal: Vec3,
        view: Vec3,
        to_light: Vec3,
        texture_factor: f32,
    ) -> Color {
        let l = to_light.normalize_or_zero();
        let h = (view + l).normalize_or_zero();

        let n_dot_l = normal.dot(l).max(0.0);
        let n_dot_h = normal.dot(h).max(0.0);

        let diffuse = light.diffuse
            * material.diffuse
            * (self.settings.light_intensity * n_dot_l * texture_factor);
        let specular = light.specular * material.specular * n_dot_h.powf(material.shininess);

        diffuse + specular
    }

    /// Ambient light color, before material reflectance.
    fn ambient_light(&self) -> Color {
        match self.settings.ambient_source {
            AmbientSource::FirstLight => self.lights.first().map_or(Color::ZERO, |l| l.ambient),
            AmbientSource::AllLights => self
                .lights
                .iter()
                .fold(Color::ZERO, |sum, light| sum + light.ambient),
        }
    }

    /// Light position in the frame geometry was submitted in.
    fn light_position(&self, light: &Light) -> Vec3 {
        match self.settings.light_frame {
            LightFrame::CurrentTransform => self.light_transform.transform_point3(light.position),
            LightFrame::World => light.position,
        }
    }

    /// Cast a shadow feeler from the hit toward the light, ignoring the
    /// surface being shaded.
    fn in_shadow(&self, hit: &Hit, light_position: Vec3) -> bool {
        let (feeler, distance) = Ray::between(hit.point, light_position);
        self.engine
            .intersect(&feeler, distance, Some(hit.object))
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::framebuffer::quantize;
    use crate::intersection::SceneBuilder;
    use crate::polygon_scene::{PolygonScene, PolygonSceneBuilder};
    use glint_core::Texture;
    use glint_math::Vec2;

    fn test_material(specular: f32) -> Arc<Material> {
        Arc::new(Material {
            name: "test".to_string(),
            ambient: Color::splat(0.2),
            diffuse: Color::splat(0.8),
            specular: Color::splat(specular),
            shininess: 32.0,
        })
    }

    fn test_light(position: Vec3) -> Light {
        Light {
            position,
            ambient: Color::splat(0.1),
            diffuse: Color::ONE,
            specular: Color::ONE,
        }
    }

    /// Axis-aligned square facing +Z, centered at (cx, cy, z).
    fn add_square(
        builder: &mut PolygonSceneBuilder,
        center: Vec3,
        half: f32,
        material: Option<Arc<Material>>,
        texture: Option<Arc<Texture>>,
    ) {
        builder.begin_polygon();
        builder.set_material(material);
        if let Some(texture) = texture {
            builder.set_texture(texture);
        }
        for (x, y) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            builder.add_tex_vertex(Vec2::new((x + 1.0) / 2.0, (y + 1.0) / 2.0));
            builder.add_vertex(center + Vec3::new(x * half, y * half, 0.0));
        }
        builder.end_polygon();
    }

    fn wall(material: Option<Arc<Material>>) -> PolygonScene {
        let mut builder = PolygonSceneBuilder::new();
        add_square(&mut builder, Vec3::new(0.0, 0.0, -1.0), 10.0, material, None);
        builder.loading_complete()
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_miss_is_black() {
        let scene = PolygonSceneBuilder::new().loading_complete();
        let lights = [test_light(Vec3::ZERO)];
        let settings = RenderSettings::default();
        let evaluator = ShadingEvaluator::new(&scene, &lights, Mat4::IDENTITY, &settings);

        assert_eq!(evaluator.shade(&forward_ray()), Color::ZERO);
    }

    #[test]
    fn test_miss_uses_background_setting() {
        let scene = PolygonSceneBuilder::new().loading_complete();
        let settings = RenderSettings {
            background: Color::new(0.1, 0.2, 0.3),
            ..Default::default()
        };
        let evaluator = ShadingEvaluator::new(&scene, &[], Mat4::IDENTITY, &settings);

        assert_eq!(evaluator.shade(&forward_ray()), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_normal_incidence() {
        // N·L = 1 and N·H = 1: ambient + 0.7 * diffuse + specular
        let scene = wall(Some(test_material(0.2)));
        let lights = [test_light(Vec3::ZERO)];
        let settings = RenderSettings::default();
        let evaluator = ShadingEvaluator::new(&scene, &lights, Mat4::IDENTITY, &settings);

        let color = evaluator.shade(&forward_ray());
        let expected = 0.1 * 0.2 + 1.0 * 0.8 * 0.7 * 1.0 + 1.0 * 0.2 * 1.0;

        assert!((expected - 0.78_f32).abs() < 1e-6);
        for channel in color.to_array() {
            assert!((channel - expected).abs() < 1e-5, "channel {channel} != {expected}");
        }
        assert_eq!(quantize(color), [198, 198, 198]);
    }

    #[test]
    fn test_normal_incidence_full_specular_clamps() {
        let scene = wall(Some(test_material(1.0)));
        let lights = [test_light(Vec3::ZERO)];
        let settings = RenderSettings::default();
        let evaluator = ShadingEvaluator::new(&scene, &lights, Mat4::IDENTITY, &settings);

        let color = evaluator.shade(&forward_ray());

        assert!((color.x - 1.58).abs() < 1e-5);
        assert_eq!(quantize(color), [255, 255, 255]);
    }

    #[test]
    fn test_missing_material_is_black() {
        let scene = wall(None);
        let lights = [test_light(Vec3::ZERO)];
        let settings = RenderSettings::default();
        let evaluator = ShadingEvaluator::new(&scene, &lights, Mat4::IDENTITY, &settings);

        assert_eq!(evaluator.shade(&forward_ray()), Color::ZERO);
    }

    #[test]
    fn test_occluder_removes_direct_light_only() {
        let light = test_light(Vec3::new(4.0, 0.0, 0.0));
        let settings = RenderSettings::default();

        let mut builder = PolygonSceneBuilder::new();
        add_square(&mut builder, Vec3::new(0.0, 0.0, -1.0), 10.0, Some(test_material(0.2)), None);
        let open = builder.loading_complete();

        // Same wall plus a blocker in the plane x = 2, crossing the feeler at (2, 0, -0.5)
        let mut builder = PolygonSceneBuilder::new();
        add_square(&mut builder, Vec3::new(0.0, 0.0, -1.0), 10.0, Some(test_material(0.2)), None);
        builder.begin_polygon();
        builder.set_material(Some(test_material(0.2)));
        builder.add_vertex(Vec3::new(2.0, -1.0, -1.5));
        builder.add_vertex(Vec3::new(2.0, 1.0, -1.5));
        builder.add_vertex(Vec3::new(2.0, 1.0, 0.5));
        builder.add_vertex(Vec3::new(2.0, -1.0, 0.5));
        builder.end_polygon();
        let blocked = builder.loading_complete();

        let lights = [light];
        let lit = ShadingEvaluator::new(&open, &lights, Mat4::IDENTITY, &settings).shade(&forward_ray());
        let shadowed =
            ShadingEvaluator::new(&blocked, &lights, Mat4::IDENTITY, &settings).shade(&forward_ray());

        let ambient = 0.1 * 0.2;
        assert!(lit.x > ambient + 0.01);
        for channel in shadowed.to_array() {
            assert!((channel - ambient).abs() < 1e-6);
        }
    }

    #[test]
    fn test_surface_does_not_shadow_itself() {
        // Light grazing the wall from the side still lights it
        let scene = wall(Some(test_material(0.0)));
        let lights = [test_light(Vec3::new(3.0, 0.0, -0.5))];
        let settings = RenderSettings::default();
        let evaluator = ShadingEvaluator::new(&scene, &lights, Mat4::IDENTITY, &settings);

        assert!(evaluator.shade(&forward_ray()).x > 0.1 * 0.2 + 0.01);
    }

    #[test]
    fn test_empty_light_list() {
        let scene = wall(Some(test_material(1.0)));
        let settings = RenderSettings::default();
        let evaluator = ShadingEvaluator::new(&scene, &[], Mat4::IDENTITY, &settings);

        assert_eq!(evaluator.shade(&forward_ray()), Color::ZERO);
    }

    #[test]
    fn test_ambient_source() {
        let scene = wall(Some(test_material(0.0)));
        // Both lights sit behind the wall, so only ambient reaches the camera
        let lights = [
            test_light(Vec3::new(0.0, 0.0, -5.0)),
            test_light(Vec3::new(1.0, 0.0, -5.0)).with_ambient(Color::splat(0.3)),
        ];

        let first = RenderSettings::default();
        let color = ShadingEvaluator::new(&scene, &lights, Mat4::IDENTITY, &first).shade(&forward_ray());
        assert!((color.x - 0.1 * 0.2).abs() < 1e-6);

        let all = RenderSettings {
            ambient_source: AmbientSource::AllLights,
            ..Default::default()
        };
        let color = ShadingEvaluator::new(&scene, &lights, Mat4::IDENTITY, &all).shade(&forward_ray());
        assert!((color.x - 0.4 * 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_texture_modulates_ambient_and_diffuse() {
        let texture = Arc::new(Texture::from_rgb8(1, 1, vec![128, 255, 255], "grey").unwrap());
        let mut builder = PolygonSceneBuilder::new();
        add_square(
            &mut builder,
            Vec3::new(0.0, 0.0, -1.0),
            10.0,
            Some(test_material(0.2)),
            Some(texture),
        );
        let scene = builder.loading_complete();
        let lights = [test_light(Vec3::ZERO)];
        let settings = RenderSettings::default();
        let evaluator = ShadingEvaluator::new(&scene, &lights, Mat4::IDENTITY, &settings);

        let factor = 128.0 / 255.0;
        let expected = (0.1 * 0.2) * factor + (0.8 * 0.7) * factor + 0.2;
        let color = evaluator.shade(&forward_ray());

        assert!((color.y - expected).abs() < 1e-5);
    }

    #[test]
    fn test_light_frame() {
        let scene = wall(Some(test_material(0.2)));
        let lights = [test_light(Vec3::ZERO)];
        // Moves the light behind the wall when applied
        let light_transform = Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0));

        let current = RenderSettings::default();
        let color = ShadingEvaluator::new(&scene, &lights, light_transform, &current).shade(&forward_ray());
        assert!((color.x - 0.1 * 0.2).abs() < 1e-6);

        let world = RenderSettings {
            light_frame: LightFrame::World,
            ..Default::default()
        };
        let color = ShadingEvaluator::new(&scene, &lights, light_transform, &world).shade(&forward_ray());
        assert!((color.x - 0.78).abs() < 1e-5);
    }

    #[test]
    fn test_back_face_is_lit_from_the_viewer_side() {
        // Reverse winding gives a -Z face normal; shading flips it toward the ray
        let mut builder = PolygonSceneBuilder::new();
        builder.begin_polygon();
        builder.set_material(Some(test_material(0.2)));
        for (x, y) in [(-1.0, 1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
            builder.add_vertex(Vec3::new(x * 10.0, y * 10.0, -1.0));
        }
        builder.end_polygon();
        let scene = builder.loading_complete();
        let lights = [test_light(Vec3::ZERO)];
        let settings = RenderSettings::default();

        let color = ShadingEvaluator::new(&scene, &lights, Mat4::IDENTITY, &settings).shade(&forward_ray());
        assert!((color.x - 0.78).abs() < 1e-5);
    }
}
