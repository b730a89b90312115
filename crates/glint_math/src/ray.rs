use crate::Vec3;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// Primary rays start at the camera origin; shadow feelers start at a
/// surface point and head toward a light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized on construction.
    ///
    /// A zero-length direction stays zero; such a ray never hits anything.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Create a ray from `from` toward `to`, returning the ray and the
    /// distance between the two points.
    pub fn between(from: Vec3, to: Vec3) -> (Self, f32) {
        let delta = to - from;
        (Self::new(from, delta), delta.length())
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
