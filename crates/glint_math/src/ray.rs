use crate::{Interval, Vec3};

/// Offset used as the default `tmin` to keep secondary rays from re-hitting
/// the surface they leave.
pub const RAY_EPS: f32 = 1e-4;

/// A ray in 3D space with origin, unit direction, and a valid parametric range.
///
/// Rays are immutable once built; the direction is normalized on construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    tmin: f32,
    tmax: f32,
}

impl Ray {
    /// Create a new ray with the default `[RAY_EPS, f32::MAX]` range.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_range(origin, direction, RAY_EPS, f32::MAX)
    }

    /// Create a new ray restricted to `[tmin, tmax]`.
    #[inline]
    pub fn with_range(origin: Vec3, direction: Vec3, tmin: f32, tmax: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            tmin,
            tmax,
        }
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

    #[inline]
    pub fn tmin(&self) -> f32 {
        self.tmin
    }

    #[inline]
    pub fn tmax(&self) -> f32 {
        self.tmax
    }

    /// The valid parametric range as an interval.
    #[inline]
    pub fn range(&self) -> Interval {
        Interval::new(self.tmin, self.tmax)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let ray = Ray::new(origin, Vec3::new(0.0, 2.0, 0.0));

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), Vec3::Y);
        assert_eq!(ray.tmin(), RAY_EPS);
        assert_eq!(ray.tmax(), f32::MAX);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_range() {
        let ray = Ray::with_range(Vec3::ZERO, Vec3::Z, 0.5, 10.0);
        let range = ray.range();

        assert_eq!(range.min, 0.5);
        assert_eq!(range.max, 10.0);
        assert!(range.contains(3.0));
    }
}
