// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::{look_at, rotation_degrees, Mat4Ext, NormalTransformMode};
