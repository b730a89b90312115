//! Primary ray generation and the per-pixel render loop.

use glint_core::{Camera, Color};
use glint_math::{Ray, Vec3};

use crate::framebuffer::Framebuffer;

/// Progress report emitted at checkpoint rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// Row just finished
    pub row: u32,
    pub total_rows: u32,
}

/// Receives checkpoint notifications while an image renders.
pub trait RenderProgress {
    fn checkpoint(&mut self, checkpoint: Checkpoint);
}

impl<F: FnMut(Checkpoint)> RenderProgress for F {
    fn checkpoint(&mut self, checkpoint: Checkpoint) {
        self(checkpoint)
    }
}

/// Ignores progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl RenderProgress for NoProgress {
    fn checkpoint(&mut self, _checkpoint: Checkpoint) {}
}

/// Reports progress through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl RenderProgress for LogProgress {
    fn checkpoint(&mut self, checkpoint: Checkpoint) {
        log::info!(
            "Rendered row {}/{}",
            checkpoint.row,
            checkpoint.total_rows
        );
    }
}

/// True when `row` should trigger a progress notification.
/// An interval of 0 disables notifications.
pub fn is_checkpoint(row: u32, interval: u32) -> bool {
    interval > 0 && row % interval == 0
}

/// Maps pixels onto the view plane at z = -1 and shoots one ray through each
/// pixel center from the view-space origin.
#[derive(Debug, Clone, Copy)]
pub struct ImageSampler {
    width: u32,
    height: u32,
    xmin: f32,
    ymax: f32,
    checkpoint_interval: u32,
}

impl ImageSampler {
    pub fn new(camera: &Camera, checkpoint_interval: u32) -> Self {
        let ymax = (camera.fov_y.to_radians() / 2.0).tan();
        Self {
            width: camera.image_width,
            height: camera.image_height,
            xmin: -ymax * camera.aspect,
            ymax,
            checkpoint_interval,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Point on the view plane for continuous image coordinates.
    ///
    /// `x` runs 0..width left to right, `y` runs 0..height top to bottom.
    pub fn view_plane_point(&self, x: f32, y: f32) -> Vec3 {
        let x_span = -2.0 * self.xmin;
        let y_span = 2.0 * self.ymax;
        Vec3::new(
            self.xmin + x / self.width as f32 * x_span,
            self.ymax - y / self.height as f32 * y_span,
            -1.0,
        )
    }

    /// Ray through the center of pixel (row, col).
    pub fn primary_ray(&self, row: u32, col: u32) -> Ray {
        let target = self.view_plane_point(col as f32 + 0.5, row as f32 + 0.5);
        Ray::new(Vec3::ZERO, target)
    }

    /// Shade every pixel, top row first.
    pub fn render<F>(&self, mut shade: F, progress: &mut dyn RenderProgress) -> Framebuffer
    where
        F: FnMut(&Ray) -> Color,
    {
        let mut image = Framebuffer::new(self.width, self.height);

        for row in 0..self.height {
            for col in 0..self.width {
                let ray = self.primary_ray(row, col);
                image.set_color(col, row, shade(&ray));
            }

            if is_checkpoint(row, self.checkpoint_interval) {
                log::trace!("Checkpoint at row {}", row);
                progress.checkpoint(Checkpoint {
                    row,
                    total_rows: self.height,
                });
            }
        }

        image
    }
}
