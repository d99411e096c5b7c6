// Frame utilities for Mat4
//
// Instances and cameras store their placement as a local-to-world Mat4 frame.
// glam::Mat4 already provides transform_point3(), transform_vector3() and inverse().

use glam::{Mat3, Mat4, Vec3};
use crate::Aabb;

/// Extension trait for Mat4 frames used by scene instances and cameras.
pub trait Mat4Ext {
    /// Transform a surface normal (inverse-transpose of the linear part), normalized.
    fn transform_normal(&self, normal: Vec3) -> Vec3;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;

    /// Origin of the frame in world space.
    fn frame_origin(&self) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        let linear = Mat3::from_mat4(*self);
        (linear.inverse().transpose() * normal).normalize()
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let min_point = Vec3::new(aabb.x.min, aabb.y.min, aabb.z.min);
        let max_point = Vec3::new(aabb.x.max, aabb.y.max, aabb.z.max);

        let mut result_min = Vec3::splat(f32::INFINITY);
        let mut result_max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { min_point.x } else { max_point.x },
                if i & 2 == 0 { min_point.y } else { max_point.y },
                if i & 4 == 0 { min_point.z } else { max_point.z },
            );
            let p = self.transform_point3(corner);
            result_min = result_min.min(p);
            result_max = result_max.max(p);
        }

        Aabb::from_points(result_min, result_max)
    }

    fn frame_origin(&self) -> Vec3 {
        self.w_axis.truncate()
    }
}

/// Camera-to-world frame looking from `eye` towards `target`.
///
/// The frame's local -Z axis points at the target, +Y is as close to `up` as possible.
pub fn look_at_frame(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up).inverse()
}

/// Orthonormal basis whose Z axis is `v` (Duff et al. 2017).
///
/// `v` must be unit length. The returned columns are (x, y, v).
pub fn basis_from_z(v: Vec3) -> Mat3 {
    let sign = 1.0_f32.copysign(v.z);
    let a = -1.0 / (sign + v.z);
    let b = v.x * v.y * a;
    let x = Vec3::new(1.0 + sign * v.x * v.x * a, sign * b, -sign * v.x);
    let y = Vec3::new(b, sign + v.y * v.y * a, -v.y);
    Mat3::from_cols(x, y, v)
}

/// Remove from `a` its component along `b` and normalize the result.
#[inline]
pub fn orthonormalize(a: Vec3, b: Vec3) -> Vec3 {
    (a - b * a.dot(b)).normalize()
}
