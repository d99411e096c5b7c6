//! The scene interface the path tracer consumes.
//!
//! Intersection and attribute lookup are owned by the scene side; the shaders
//! only ever see a [`HitRecord`] and ask the oracle to resolve it.

use glint_core::{Camera, Color, Material, PrimitiveKind};
use glint_math::{Ray, Vec2, Vec3};

/// Result of a ray-scene query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Whether anything was hit; the other fields are meaningless otherwise
    pub hit: bool,
    /// Instance that was hit
    pub instance: usize,
    /// Element (point, line or triangle) within the instance's shape
    pub element: usize,
    /// Element-local coordinates (barycentrics for triangles)
    pub uv: Vec2,
    /// Ray parameter at the hit
    pub distance: f32,
}

impl HitRecord {
    pub const MISS: HitRecord = HitRecord {
        hit: false,
        instance: 0,
        element: 0,
        uv: Vec2::ZERO,
        distance: f32::MAX,
    };

    pub fn new(instance: usize, element: usize, uv: Vec2, distance: f32) -> Self {
        Self {
            hit: true,
            instance,
            element,
            uv,
            distance,
        }
    }
}

impl Default for HitRecord {
    fn default() -> Self {
        Self::MISS
    }
}

/// Ray intersection and per-hit attribute resolution.
///
/// Attribute methods are only called with records whose `hit` flag is set.
/// Implementations are shared read-only across render threads.
pub trait SceneOracle: Sync {
    fn intersect(&self, ray: &Ray) -> HitRecord;

    /// World-space hit position.
    fn position(&self, hit: &HitRecord) -> Vec3;

    /// World-space unit shading normal, as authored (not yet facing the ray).
    fn normal(&self, hit: &HitRecord) -> Vec3;

    fn material(&self, hit: &HitRecord) -> &Material;

    fn texcoord(&self, hit: &HitRecord) -> Vec2;

    /// Kind of primitive that was hit.
    fn primitive(&self, hit: &HitRecord) -> PrimitiveKind;

    /// Radiance arriving along the reversed unit `direction` when nothing is hit.
    fn environment(&self, direction: Vec3) -> Color;

    fn camera(&self, index: usize) -> Option<&Camera>;
}
