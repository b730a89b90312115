//! Hierarchical modeling transforms.
//!
//! The bottom entry is the camera's look-at transform. Modeling operations
//! right-multiply the top, so each one applies in the current local frame.

use glint_math::{look_at, rotation_degrees, Mat4, Vec3};

/// A stack of affine transforms that is never empty.
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<Mat4>,
}

impl TransformStack {
    /// Create a stack holding only the identity.
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::IDENTITY],
        }
    }

    /// Reset to a single look-at transform mapping world space into view space.
    pub fn initialize(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        self.stack.clear();
        self.stack.push(look_at(eye, center, up));
    }

    /// Duplicate the top entry.
    pub fn push(&mut self) {
        let top = self.current();
        self.stack.push(top);
    }

    /// Remove the top entry. The base transform is never popped.
    ///
    /// Popping the base is a caller error: it panics in debug builds and is
    /// ignored with a warning otherwise.
    pub fn pop(&mut self) {
        debug_assert!(self.stack.len() > 1, "pop() without a matching push()");
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            log::warn!("Ignoring pop() of the base view transform");
        }
    }

    /// Rotate by `angle` degrees about `axis` in the current local frame.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        self.apply(rotation_degrees(angle, axis));
    }

    /// Translate in the current local frame.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.apply(Mat4::from_translation(Vec3::new(x, y, z)));
    }

    /// Scale in the current local frame.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.apply(Mat4::from_scale(Vec3::new(x, y, z)));
    }

    /// Right-multiply the top entry by `transform`.
    pub fn apply(&mut self, transform: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top *= transform;
        }
    }

    /// The composite transform on top of the stack.
    pub fn current(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Number of entries, including the base.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
