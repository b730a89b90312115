use glint_math::{look_at, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Camera for ray generation.
///
/// Positions the viewer with eye/center/up and describes the projection
/// the image sampler shoots primary rays through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    /// Width over height of the view plane
    pub aspect: f32,
    pub image_width: u32,
    pub image_height: u32,
}

impl Camera {
    /// Create a new camera with a 640x480 image and a 60 degree field of view.
    pub fn new(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        Self {
            eye,
            center,
            up,
            ..Default::default()
        }
    }

    /// Set image resolution. Also resets the aspect ratio to width / height.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    /// Override the projection aspect ratio.
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.eye, self.center, self.up)
    }

    /// Total number of pixels in the output image.
    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 60.0,
            aspect: 640.0 / 480.0,
            image_width: 640,
            image_height: 480,
        }
    }
}
