//! Ray-primitive intersection for the reference oracle.
//!
//! Every test returns the element-local uv and the ray parameter of the hit.

use glint_math::{Interval, Ray, Vec2, Vec3};

/// Möller-Trumbore ray-triangle intersection.
///
/// The uv are the barycentric weights of `p1` and `p2`.
pub fn intersect_triangle(ray: &Ray, ray_t: Interval, p0: Vec3, p1: Vec3, p2: Vec3) -> Option<(Vec2, f32)> {
    let edge1 = p1 - p0;
    let edge2 = p2 - p0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - p0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if !ray_t.contains(t) {
        return None;
    }

    Some((Vec2::new(u, v), t))
}

/// Intersect a point rendered as a sphere of radius `radius`.
///
/// The hit is reported at the point of the ray closest to the center.
pub fn intersect_point(ray: &Ray, ray_t: Interval, p: Vec3, radius: f32) -> Option<(Vec2, f32)> {
    let t = (p - ray.origin()).dot(ray.direction());
    if !ray_t.contains(t) {
        return None;
    }

    let offset = p - ray.at(t);
    if offset.length_squared() > radius * radius {
        return None;
    }

    Some((Vec2::ZERO, t))
}

/// Intersect a segment rendered as a cylinder with radii `r0` and `r1` at its ends.
///
/// Uses the closest points between the ray and the segment; `uv.x` is the
/// position along the segment, `uv.y` the distance from its axis relative to
/// the radius.
pub fn intersect_line(
    ray: &Ray,
    ray_t: Interval,
    p0: Vec3,
    p1: Vec3,
    r0: f32,
    r1: f32,
) -> Option<(Vec2, f32)> {
    let u = ray.direction();
    let v = p1 - p0;
    let w = ray.origin() - p0;

    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);
    let det = a * c - b * b;

    // Parallel to the segment
    if det == 0.0 {
        return None;
    }

    let t = (b * e - c * d) / det;
    let s = ((a * e - b * d) / det).clamp(0.0, 1.0);
    if !ray_t.contains(t) {
        return None;
    }

    let on_ray = ray.at(t);
    let on_line = p0 + v * s;
    let radius = r0 * (1.0 - s) + r1 * s;
    let distance_squared = (on_line - on_ray).length_squared();
    if distance_squared > radius * radius {
        return None;
    }

    Some((Vec2::new(s, distance_squared.sqrt() / radius), t))
}
