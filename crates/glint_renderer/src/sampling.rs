//! Random streams and the direction-sampling math used by the shaders.

use std::f32::consts::PI;

use glint_math::{basis_from_z, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// An independent random stream keyed by `(seed, index)`.
///
/// Every pixel owns one; no two streams share state, so pixels can be
/// sampled on any thread in any order.
#[derive(Clone, Debug)]
pub struct RngStream(StdRng);

impl RngStream {
    pub fn new(seed: u64, index: u64) -> Self {
        let mut key = [0u8; 32];
        key[..8].copy_from_slice(&seed.to_le_bytes());
        key[8..16].copy_from_slice(&index.to_le_bytes());
        Self(StdRng::from_seed(key))
    }

    /// Uniform sample in [0, 1).
    #[inline]
    pub fn rand1f(&mut self) -> f32 {
        self.0.gen()
    }

    /// Uniform sample in [0, 1)².
    #[inline]
    pub fn rand2f(&mut self) -> Vec2 {
        let x = self.rand1f();
        let y = self.rand1f();
        Vec2::new(x, y)
    }
}

impl RngCore for RngStream {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

/// Direction on the hemisphere around `normal`, uniform in solid angle.
pub fn sample_hemisphere(normal: Vec3, ruv: Vec2) -> Vec3 {
    let z = ruv.y;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * ruv.x;
    basis_from_z(normal) * Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Direction on the hemisphere around `normal`, cosine distributed.
pub fn sample_hemisphere_cos(normal: Vec3, ruv: Vec2) -> Vec3 {
    let z = ruv.y.sqrt();
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * ruv.x;
    basis_from_z(normal) * Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Direction on the hemisphere around `normal`, distributed as cos^exponent.
///
/// An infinite exponent returns `normal` exactly.
pub fn sample_hemisphere_cospower(exponent: f32, normal: Vec3, ruv: Vec2) -> Vec3 {
    let z = ruv.y.powf(1.0 / (exponent + 1.0));
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * ruv.x;
    basis_from_z(normal) * Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Cosine-power exponent for a roughness; infinite (a mirror lobe) at 0.
#[inline]
pub fn cospower_exponent(roughness: f32) -> f32 {
    2.0 / (roughness * roughness)
}

/// Mirror `w` (pointing away from the surface) about `n`.
#[inline]
pub fn reflect(w: Vec3, n: Vec3) -> Vec3 {
    -w + 2.0 * n.dot(w) * n
}

/// Refract `w` (pointing away from the surface, on the side of `n`) with
/// relative index `inv_eta = n_incident / n_transmitted`.
///
/// Returns zero under total internal reflection.
pub fn refract(w: Vec3, n: Vec3, inv_eta: f32) -> Vec3 {
    let cosine = n.dot(w);
    let k = 1.0 + inv_eta * inv_eta * (cosine * cosine - 1.0);
    if k < 0.0 {
        return Vec3::ZERO;
    }
    -w * inv_eta + (inv_eta * cosine - k.sqrt()) * n
}

/// Schlick Fresnel for base reflectance `specular` between `normal` and `outgoing`.
#[inline]
pub fn fresnel_schlick(specular: f32, normal: Vec3, outgoing: Vec3) -> f32 {
    if specular == 0.0 {
        return 0.0;
    }
    let cosine = normal.dot(outgoing);
    specular + (1.0 - specular) * (1.0 - cosine.abs()).clamp(0.0, 1.0).powi(5)
}

/// Schlick reflectance with the base term derived from a relative index of refraction.
#[inline]
pub fn reflectance(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
