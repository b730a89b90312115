//! Render the Glint demo scene to a PNG.
//!
//! Usage: glint [--settings <settings.json>] [--texture <image>] [output.png]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use glint_core::{Camera, Color, Light, Material, RenderSettings, Texture};
use glint_math::{Vec2, Vec3};
use glint_renderer::{LogProgress, PolygonRecord, RaytraceRenderer};

const DEFAULT_OUTPUT: &str = "glint.png";

#[derive(Debug, Default, PartialEq)]
struct Args {
    settings: Option<PathBuf>,
    texture: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                let path = args.next().context("--settings expects a path")?;
                parsed.settings = Some(PathBuf::from(path));
            }
            "--texture" => {
                let path = args.next().context("--texture expects a path")?;
                parsed.texture = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            _ => {
                if parsed.output.is_some() {
                    bail!("Unexpected argument: {arg}");
                }
                parsed.output = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(parsed)
}

/// Axis-aligned cube of half-size 1 centered at the origin, faces wound
/// counter-clockwise seen from outside.
fn cube_faces() -> Vec<PolygonRecord> {
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::Z,
            [
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(1.0, -1.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(-1.0, 1.0, 1.0),
            ],
        ),
        (
            Vec3::NEG_Z,
            [
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(-1.0, 1.0, -1.0),
                Vec3::new(1.0, 1.0, -1.0),
            ],
        ),
        (
            Vec3::X,
            [
                Vec3::new(1.0, -1.0, 1.0),
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(1.0, 1.0, -1.0),
                Vec3::new(1.0, 1.0, 1.0),
            ],
        ),
        (
            Vec3::NEG_X,
            [
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(-1.0, 1.0, 1.0),
                Vec3::new(-1.0, 1.0, -1.0),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(-1.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, -1.0),
                Vec3::new(-1.0, 1.0, -1.0),
            ],
        ),
        (
            Vec3::NEG_Y,
            [
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, 1.0),
                Vec3::new(-1.0, -1.0, 1.0),
            ],
        ),
    ];

    faces
        .into_iter()
        .map(|(normal, corners)| PolygonRecord::new(corners.to_vec()).with_normals(vec![normal; 4]))
        .collect()
}

/// Floor quad in the y = 0 plane with its texture repeated `repeat` times.
fn floor(half: f32, repeat: f32) -> PolygonRecord {
    PolygonRecord::new(vec![
        Vec3::new(-half, 0.0, half),
        Vec3::new(half, 0.0, half),
        Vec3::new(half, 0.0, -half),
        Vec3::new(-half, 0.0, -half),
    ])
    .with_normals(vec![Vec3::Y; 4])
    .with_texcoords(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(repeat, 0.0),
        Vec2::new(repeat, repeat),
        Vec2::new(0.0, repeat),
    ])
}

fn demo_lights() -> Vec<Light> {
    vec![
        Light::new(Vec3::new(-4.0, 6.0, 5.0)).with_ambient(Color::splat(0.15)),
        Light::new(Vec3::new(5.0, 3.0, 2.0))
            .with_ambient(Color::ZERO)
            .with_diffuse(Color::new(0.4, 0.45, 0.6))
            .with_specular(Color::splat(0.3)),
    ]
}

fn render_demo(settings: RenderSettings, texture: Arc<Texture>) -> glint_renderer::Framebuffer {
    let camera = Camera::new(Vec3::new(0.0, 3.0, 8.0), Vec3::new(0.0, 0.8, 0.0), Vec3::Y)
        .with_resolution(640, 480)
        .with_fov(45.0);

    let floor_material = Arc::new(Material::new("floor", Color::splat(0.9)));
    let cube_material = Arc::new(
        Material::new("cube", Color::new(0.8, 0.25, 0.2)).with_specular(Color::splat(0.6), 48.0),
    );

    let mut renderer = RaytraceRenderer::new(camera, settings);

    renderer.set_material(Some(floor_material));
    renderer.polygon(&floor(6.0, 6.0), Some(texture));

    renderer.set_material(Some(cube_material));
    renderer.push_matrix();
    renderer.translate(0.0, 1.0, 0.0);
    renderer.rotate(35.0, Vec3::Y);
    renderer.scale(0.9, 0.9, 0.9);
    for face in cube_faces() {
        renderer.polygon(&face, None);
    }
    renderer.pop_matrix();

    renderer.render(&demo_lights(), &mut LogProgress)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let settings = match &args.settings {
        Some(path) => RenderSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };

    let texture = match &args.texture {
        Some(path) => Texture::load(path)
            .with_context(|| format!("Failed to load texture {}", path.display()))?,
        None => Texture::checker(256, 8, [60, 60, 60], [230, 230, 230]),
    };
    log::info!(
        "Floor texture {} ({}x{})",
        texture.path,
        texture.width,
        texture.height
    );

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let image = render_demo(settings, Arc::new(texture))
        .into_image()
        .context("Framebuffer does not fit an image buffer")?;

    image
        .save_with_format(&output, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!("Saved {}", output.display());
    Ok(())
}
