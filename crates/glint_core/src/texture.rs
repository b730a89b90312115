//! Textures for diffuse modulation.
//!
//! Textures are stored as tightly packed RGB8 rows and sampled at the
//! nearest texel. Only channel 0 feeds the shader, as a scalar factor.

use std::path::Path;

use glint_math::Vec2;
use thiserror::Error;

/// Errors that can occur while building or loading a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture must not be empty (got {width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("Texture data is {actual} bytes, expected {expected} for {width}x{height} RGB")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A 2D RGB8 texture, row-major with the top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data, 3 bytes per pixel
    pixels: Vec<u8>,

    /// Source file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a texture from packed RGB8 data.
    pub fn from_rgb8(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }

        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            path: path.into(),
        })
    }

    /// Load a texture from any image format the `image` crate can decode.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let texture = Self::from_rgb8(width, height, rgb.into_raw(), path.to_string_lossy())?;

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            texture.path,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// A `size`x`size` checkerboard with `cells` squares per side.
    pub fn checker(size: u32, cells: u32, a: [u8; 3], b: [u8; 3]) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let mut pixels = Vec::with_capacity(size as usize * size as usize * 3);

        for y in 0..size {
            for x in 0..size {
                let color = if (x / cell + y / cell) % 2 == 0 { a } else { b };
                pixels.extend_from_slice(&color);
            }
        }

        Self {
            width: size,
            height: size,
            pixels,
            path: "<checker>".to_string(),
        }
    }

    /// Sample the nearest texel at UV coordinates.
    ///
    /// UVs wrap into [0, 1), with (0, 0) at the bottom-left of the image.
    pub fn sample_nearest(&self, uv: Vec2) -> [u8; 3] {
        let u = uv.x.rem_euclid(1.0);
        let v = uv.y.rem_euclid(1.0);

        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = (((1.0 - v) * self.height as f32) as u32).min(self.height - 1);

        self.get_pixel(x, y)
    }

    /// Scalar modulation factor at `uv`: channel 0 of the nearest texel in [0, 1].
    pub fn modulation(&self, uv: Vec2) -> f32 {
        self.sample_nearest(uv)[0] as f32 / 255.0
    }

    /// Get pixel at integer coordinates.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        match self.pixels.get(idx..idx + 3) {
            Some(texel) => [texel[0], texel[1], texel[2]],
            None => [0, 0, 0],
        }
    }

    /// Raw RGB8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Get total size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.pixels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Texture {
        // Top row: red, green. Bottom row: blue, white.
        let pixels = vec![
            255, 0, 0, 0, 255, 0,
            0, 0, 255, 255, 255, 255,
        ];
        Texture::from_rgb8(2, 2, pixels, "test").unwrap()
    }

    #[test]
    fn test_from_rgb8_validates_size() {
        let err = Texture::from_rgb8(2, 2, vec![0; 11], "short").unwrap_err();
        assert!(matches!(err, TextureError::SizeMismatch { expected: 12, actual: 11, .. }));

        let err = Texture::from_rgb8(0, 4, Vec::new(), "empty").unwrap_err();
        assert!(matches!(err, TextureError::Empty { .. }));
    }

    #[test]
    fn test_sample_nearest_orientation() {
        let tex = two_by_two();

        // v = 0 is the bottom row
        assert_eq!(tex.sample_nearest(Vec2::new(0.25, 0.25)), [0, 0, 255]);
        assert_eq!(tex.sample_nearest(Vec2::new(0.75, 0.25)), [255, 255, 255]);
        assert_eq!(tex.sample_nearest(Vec2::new(0.25, 0.75)), [255, 0, 0]);
        assert_eq!(tex.sample_nearest(Vec2::new(0.75, 0.75)), [0, 255, 0]);
    }

    #[test]
    fn test_sample_wraps() {
        let tex = two_by_two();
        assert_eq!(
            tex.sample_nearest(Vec2::new(1.25, -0.75)),
            tex.sample_nearest(Vec2::new(0.25, 0.25))
        );
    }

    #[test]
    fn test_modulation_uses_channel_zero() {
        let tex = two_by_two();

        assert_eq!(tex.modulation(Vec2::new(0.25, 0.75)), 1.0);
        assert_eq!(tex.modulation(Vec2::new(0.75, 0.75)), 0.0);
    }

    #[test]
    fn test_checker() {
        let tex = Texture::checker(4, 2, [255, 255, 255], [0, 0, 0]);

        assert_eq!(tex.size_bytes(), 4 * 4 * 3);
        assert_eq!(tex.get_pixel(0, 0), [255, 255, 255]);
        assert_eq!(tex.get_pixel(2, 0), [0, 0, 0]);
        assert_eq!(tex.get_pixel(2, 2), [255, 255, 255]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Texture::load("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, TextureError::Load { .. }));
    }
}
