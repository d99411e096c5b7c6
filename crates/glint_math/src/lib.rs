//! Glint math - vector types, rays and bounding volumes shared by the
//! scene description and the path tracer.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::{Ray, RAY_EPS};
pub use transform::{basis_from_z, look_at_frame, orthonormalize, Mat4Ext};
