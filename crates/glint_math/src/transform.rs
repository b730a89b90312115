// Transform utilities for Mat4
//
// Extends glam::Mat4 with the operations the modeling stack needs.
// Note: glam::Mat4 already provides transform_point3() and transform_vector3()

use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// How surface normals are carried through a modeling transform.
///
/// `SameAsVertex` applies the linear part of the transform, which is only
/// correct for rigid motions and uniform scale. `InverseTranspose` stays
/// perpendicular to the surface under non-uniform scale as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalTransformMode {
    #[default]
    SameAsVertex,
    InverseTranspose,
}

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a normal vector according to `mode`. Translation never applies.
    fn transform_normal(&self, normal: Vec3, mode: NormalTransformMode) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_normal(&self, normal: Vec3, mode: NormalTransformMode) -> Vec3 {
        match mode {
            NormalTransformMode::SameAsVertex => self.transform_vector3(normal),
            NormalTransformMode::InverseTranspose => {
                let linear = Mat3::from_mat4(*self);
                // Singular: no inverse, use the linear part
                if linear.determinant().abs() <= f32::EPSILON {
                    return linear * normal;
                }
                linear.inverse().transpose() * normal
            }
        }
    }
}

/// Right-handed look-at transform mapping world space into view space.
///
/// The camera sits at the origin of view space looking down -Z with +Y up.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, center, up)
}

/// Rotation of `angle` degrees about `axis`. A zero axis yields the identity.
pub fn rotation_degrees(angle: f32, axis: Vec3) -> Mat4 {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return Mat4::IDENTITY;
    }
    Mat4::from_axis_angle(axis, angle.to_radians())
}
