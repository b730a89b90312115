//! Convex polygon primitive for ray tracing.
//!
//! Polygons are fan-triangulated around their first vertex. Each triangle
//! is tested with the Möller-Trumbore algorithm.

use std::sync::Arc;

use glint_core::{Material, Texture};
use glint_math::{Interval, Ray, Vec2, Vec3};

/// Rays closer to parallel than this never hit a triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A world-space polygon with optional per-vertex normals and texcoords.
pub(crate) struct Polygon {
    vertices: Vec<Vec3>,
    /// Empty, or one per vertex
    normals: Vec<Vec3>,
    /// Empty, or one per vertex
    texcoords: Vec<Vec2>,
    /// Unit face normal from Newell's method, zero when degenerate
    face_normal: Vec3,
    material: Option<Arc<Material>>,
    texture: Option<Arc<Texture>>,
}

/// Where a ray met a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PolygonHit {
    pub t: f32,
}

impl Polygon {
    /// Create a polygon. Attribute lists whose length differs from the vertex
    /// count are dropped.
    pub fn new(
        vertices: Vec<Vec3>,
        mut normals: Vec<Vec3>,
        mut texcoords: Vec<Vec2>,
        material: Option<Arc<Material>>,
        texture: Option<Arc<Texture>>,
    ) -> Self {
        if !normals.is_empty() && normals.len() != vertices.len() {
            log::debug!(
                "Normal count ({}) doesn't match vertex count ({}), using the face normal",
                normals.len(),
                vertices.len()
            );
            normals.clear();
        }
        if !texcoords.is_empty() && texcoords.len() != vertices.len() {
            log::debug!(
                "Texcoord count ({}) doesn't match vertex count ({}), dropping texcoords",
                texcoords.len(),
                vertices.len()
            );
            texcoords.clear();
        }

        let face_normal = newell_normal(&vertices);

        Self {
            vertices,
            normals,
            texcoords,
            face_normal,
            material,
            texture,
        }
    }

    /// True when the polygon can never be hit.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3 || self.face_normal == Vec3::ZERO
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    /// Nearest hit with `t` strictly inside `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<PolygonHit> {
        if self.is_degenerate() {
            return None;
        }

        let mut closest = ray_t;
        let mut result = None;

        for i in 1..self.vertices.len() - 1 {
            let tri = (self.vertices[0], self.vertices[i], self.vertices[i + 1]);
            if let Some(t) = hit_triangle(ray, tri) {
                if closest.surrounds(t) {
                    closest = closest.shrink_to(t);
                    result = Some(PolygonHit { t });
                }
            }
        }

        result
    }

    /// Interpolated normal and texcoord at a point on the polygon.
    ///
    /// Without per-vertex normals the face normal is used.
    pub fn surface_at(&self, point: Vec3) -> (Vec3, Option<Vec2>) {
        if self.normals.is_empty() && self.texcoords.is_empty() {
            return (self.face_normal, None);
        }

        let Some((i, weights)) = self.locate(point) else {
            return (self.face_normal, None);
        };

        let normal = if self.normals.is_empty() {
            self.face_normal
        } else {
            weights.x * self.normals[0] + weights.y * self.normals[i] + weights.z * self.normals[i + 1]
        };

        let texcoord = if self.texcoords.is_empty() {
            None
        } else {
            Some(
                weights.x * self.texcoords[0]
                    + weights.y * self.texcoords[i]
                    + weights.z * self.texcoords[i + 1],
            )
        };

        (normal, texcoord)
    }

    /// Find the fan triangle containing `point` and its barycentric weights.
    ///
    /// Points that fall just outside every triangle (numerical noise on
    /// shared edges) resolve to the triangle they are least outside of.
    fn locate(&self, point: Vec3) -> Option<(usize, Vec3)> {
        if self.is_degenerate() {
            return None;
        }

        let mut best: Option<(usize, Vec3)> = None;
        for i in 1..self.vertices.len() - 1 {
            let Some(weights) =
                barycentric(point, self.vertices[0], self.vertices[i], self.vertices[i + 1])
            else {
                continue;
            };

            if weights.min_element() >= 0.0 {
                return Some((i, weights));
            }

            let better = match best {
                Some((_, current)) => weights.min_element() > current.min_element(),
                None => true,
            };
            if better {
                best = Some((i, weights));
            }
        }

        best
    }
}

/// Möller-Trumbore ray-triangle intersection. Returns the ray parameter.
fn hit_triangle(ray: &Ray, (v0, v1, v2): (Vec3, Vec3, Vec3)) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle (or the triangle is a sliver)
    if a.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    Some(f * edge2.dot(q))
}

/// Barycentric weights of `p` (assumed in the triangle's plane) for (a, b, c).
fn barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<Vec3> {
    let e0 = b - a;
    let e1 = c - a;
    let e2 = p - a;

    let d00 = e0.dot(e0);
    let d01 = e0.dot(e1);
    let d11 = e1.dot(e1);
    let d20 = e2.dot(e0);
    let d21 = e2.dot(e1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < f32::EPSILON * d00.max(d11).max(1.0) {
        return None;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Some(Vec3::new(1.0 - v - w, v, w))
}

/// Polygon normal by Newell's method; counter-clockwise winding faces the viewer.
fn newell_normal(vertices: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for (i, current) in vertices.iter().enumerate() {
        let next = vertices[(i + 1) % vertices.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(z: f32) -> Vec<Vec3> {
        vec![
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, 1.0, z),
        ]
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let square = Polygon::new(unit_square(-1.0), Vec::new(), Vec::new(), None, None);
        assert!((square.face_normal - Vec3::Z).length() < 1e-6);

        let mut reversed = unit_square(-1.0);
        reversed.reverse();
        let square = Polygon::new(reversed, Vec::new(), Vec::new(), None, None);
        assert!((square.face_normal + Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_polygon_hit() {
        let square = Polygon::new(unit_square(-2.0), Vec::new(), Vec::new(), None, None);

        // Second fan triangle covers the upper-left half
        let ray = Ray::new(Vec3::new(-0.5, 0.5, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = square.hit(&ray, Interval::positive(f32::INFINITY)).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-5);

        let ray = Ray::new(Vec3::new(0.5, -0.5, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(square.hit(&ray, Interval::positive(f32::INFINITY)).is_some());
    }

    #[test]
    fn test_polygon_miss() {
        let square = Polygon::new(unit_square(-2.0), Vec::new(), Vec::new(), None, None);

        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(square.hit(&ray, Interval::positive(f32::INFINITY)).is_none());

        // Outside the square
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(square.hit(&ray, Interval::positive(f32::INFINITY)).is_none());

        // Beyond max distance
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(square.hit(&ray, Interval::positive(1.5)).is_none());
    }

    #[test]
    fn test_empty_and_degenerate_polygons_never_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let empty = Polygon::new(Vec::new(), Vec::new(), Vec::new(), None, None);
        assert!(empty.is_degenerate());
        assert!(empty.hit(&ray, Interval::positive(f32::INFINITY)).is_none());
        assert_eq!(empty.surface_at(Vec3::ZERO).1, None);

        let line = vec![Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, -1.0), Vec3::new(2.0, 0.0, -1.0)];
        let line = Polygon::new(line, Vec::new(), Vec::new(), None, None);
        assert!(line.is_degenerate());
        assert!(line.hit(&ray, Interval::positive(f32::INFINITY)).is_none());
    }

    #[test]
    fn test_interpolated_attributes() {
        let normals = vec![Vec3::X, Vec3::X, Vec3::Y, Vec3::Y];
        let texcoords = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let square = Polygon::new(unit_square(-1.0), normals, texcoords, None, None);

        let (normal, texcoord) = square.surface_at(Vec3::new(0.5, 0.0, -1.0));
        let texcoord = texcoord.unwrap();

        assert!((texcoord - Vec2::new(0.75, 0.5)).length() < 1e-5);
        // Halfway up the square the normal is an even blend of X and Y
        assert!((normal.x - normal.y).abs() < 1e-5);
    }

    #[test]
    fn test_mismatched_attributes_are_dropped() {
        let square = Polygon::new(unit_square(-1.0), vec![Vec3::X], vec![Vec2::ZERO], None, None);

        let (normal, texcoord) = square.surface_at(Vec3::new(0.0, 0.0, -1.0));
        assert!((normal - Vec3::Z).length() < 1e-6);
        assert_eq!(texcoord, None);
    }
}
