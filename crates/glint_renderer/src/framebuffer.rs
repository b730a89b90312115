use glint_core::Color;
use glint_math::Interval;
use image::RgbImage;

/// Convert a color to 8-bit RGB.
///
/// Channels are clamped to [0, 1] and truncated, so 0.78 becomes 198.
/// No gamma is applied.
pub fn quantize(color: Color) -> [u8; 3] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b]
}

/// Row-major RGB8 output image. Row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// Get the pixel at column x, row y.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Set the pixel at column x, row y.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Quantize and store a shaded color.
    pub fn set_color(&mut self, x: u32, y: u32, color: Color) {
        self.set_pixel(x, y, quantize(color));
    }

    /// Raw RGB bytes, 3 per pixel, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Convert into an `image` buffer for encoding.
    ///
    /// Returns `None` only if the dimensions overflow the image crate's limits.
    pub fn into_image(self) -> Option<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data)
    }
}
