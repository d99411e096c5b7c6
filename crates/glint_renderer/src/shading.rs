//! Radiance estimators.
//!
//! `raytrace` is the full recursive path tracer over the five material
//! behaviors. The other shaders are diagnostics: a diffuse-only tracer and
//! four single-hit visualizations.
//!
//! Radiance is RGBA. Surface and environment terms enter with alpha 1, the
//! diagnostic shaders return transparent black on a miss.

use std::f32::consts::PI;

use glint_core::{Material, MaterialKind, PrimitiveKind};
use glint_math::{orthonormalize, Ray, Vec3, Vec4};

use crate::config::{RenderConfig, ShaderKind};
use crate::oracle::SceneOracle;
use crate::sampling::{
    cospower_exponent, fresnel_schlick, reflect, reflectance, refract, sample_hemisphere,
    sample_hemisphere_cos, sample_hemisphere_cospower, RngStream,
};
use crate::wet::wet_tint;

/// Base reflectance of dielectric coatings.
const DIELECTRIC_SPECULAR: f32 = 0.04;

/// Estimate the radiance arriving along `ray` with the configured shader.
pub fn shade<S: SceneOracle + ?Sized>(
    scene: &S,
    ray: &Ray,
    rng: &mut RngStream,
    config: &RenderConfig,
) -> Vec4 {
    match config.shader {
        ShaderKind::Raytrace => PathTracer::new(scene, config).radiance(ray, PathDepth::default(), rng),
        ShaderKind::Matte => shade_matte(scene, ray, 0, rng, config),
        ShaderKind::Eyelight => shade_eyelight(scene, ray),
        ShaderKind::Normal => shade_normal(scene, ray),
        ShaderKind::Texcoord => shade_texcoord(scene, ray),
        ShaderKind::Color => shade_color(scene, ray),
    }
}

/// Recursion depth along a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathDepth {
    /// Surface interactions so far, compared against `bounces`
    pub bounce: u32,
    /// Opacity pass-through hops so far, compared against `max_passthrough`
    pub passthrough: u32,
}

impl PathDepth {
    fn next_bounce(self) -> Self {
        Self {
            bounce: self.bounce + 1,
            ..self
        }
    }

    fn next_passthrough(self) -> Self {
        Self {
            bounce: self.bounce + 1,
            passthrough: self.passthrough + 1,
        }
    }
}

/// Make the shading normal face the incoming ray.
///
/// Points are treated as camera-facing discs and lines as cylinders; surfaces
/// are flipped when seen from behind.
pub fn orient_normal(primitive: PrimitiveKind, normal: Vec3, direction: Vec3) -> Vec3 {
    match primitive {
        PrimitiveKind::Point => -direction,
        PrimitiveKind::Line => orthonormalize(-direction, normal),
        PrimitiveKind::Triangle => {
            if (-direction).dot(normal) < 0.0 {
                -normal
            } else {
                normal
            }
        }
    }
}

/// Sample a reflection off a rough conductor-like lobe around `normal`.
///
/// Roughness 0 is an exact mirror of `outgoing` about `normal`.
pub fn sample_microfacet_reflection(
    roughness: f32,
    normal: Vec3,
    outgoing: Vec3,
    rng: &mut RngStream,
) -> Vec3 {
    let exponent = cospower_exponent(roughness);
    let microfacet = sample_hemisphere_cospower(exponent, normal, rng.rand2f());
    if roughness == 0.0 {
        reflect(outgoing, microfacet)
    } else {
        let halfway = sample_hemisphere_cospower(exponent, microfacet, rng.rand2f());
        reflect(outgoing, halfway)
    }
}

/// Full path tracer.
pub struct PathTracer<'a, S: SceneOracle + ?Sized> {
    scene: &'a S,
    config: &'a RenderConfig,
}

impl<'a, S: SceneOracle + ?Sized> PathTracer<'a, S> {
    pub fn new(scene: &'a S, config: &'a RenderConfig) -> Self {
        Self { scene, config }
    }

    /// Radiance along `ray`.
    pub fn radiance(&self, ray: &Ray, depth: PathDepth, rng: &mut RngStream) -> Vec4 {
        let scene = self.scene;
        let hit = scene.intersect(ray);
        if !hit.hit {
            return scene.environment(ray.direction()).extend(1.0);
        }

        let material = scene.material(&hit);
        let position = scene.position(&hit);
        let shading_normal = scene.normal(&hit);
        let direction = ray.direction();
        let outgoing = -direction;

        let mut radiance = material.emission.extend(1.0);

        // Non-opaque surfaces let part of the light straight through. The hop
        // happens before the bounce cutoff, so it has its own limit.
        if rng.rand1f() < 1.0 - material.opacity && depth.passthrough < self.config.max_passthrough {
            radiance += self.trace(position, direction, depth.next_passthrough(), rng);
        }

        if depth.bounce >= self.config.bounces {
            return radiance;
        }

        let primitive = scene.primitive(&hit);
        let normal = orient_normal(primitive, shading_normal, direction);
        let next = depth.next_bounce();
        let color = material.color.extend(1.0);

        if self.config.wet {
            let exponent = cospower_exponent(material.roughness);
            let wet_normal = sample_hemisphere_cospower(exponent, normal, rng.rand2f());
            if material.kind != MaterialKind::Transparent {
                let incoming = if material.roughness == 0.0 {
                    reflect(outgoing, wet_normal)
                } else {
                    let halfway = sample_hemisphere_cospower(exponent, wet_normal, rng.rand2f());
                    reflect(outgoing, halfway)
                };
                let tint = wet_tint(material.color, scene.texcoord(&hit), self.config.resolution);
                let weight = self.config.wet_weights.weight(material.wet_role);
                return radiance
                    + color * tint * self.trace(position, incoming, next, rng) * weight;
            }
        }

        radiance + self.scatter(material, primitive, position, normal, shading_normal, outgoing, next, rng)
    }

    /// Indirect term for the material behavior.
    #[allow(clippy::too_many_arguments)]
    fn scatter(
        &self,
        material: &Material,
        primitive: PrimitiveKind,
        position: Vec3,
        normal: Vec3,
        shading_normal: Vec3,
        outgoing: Vec3,
        next: PathDepth,
        rng: &mut RngStream,
    ) -> Vec4 {
        let color = material.color.extend(1.0);

        match material.kind {
            MaterialKind::Matte => {
                // Uniform hemisphere term (pdf 1/2π) plus a cosine-weighted
                // term. Both are kept.
                let incoming = sample_hemisphere(normal, rng.rand2f());
                let uniform = color / PI
                    * (2.0 * PI)
                    * self.trace(position, incoming, next, rng)
                    * normal.dot(incoming);
                let incoming = sample_hemisphere_cos(normal, rng.rand2f());
                let cosine =
                    color / PI * self.trace(position, incoming, next, rng) * normal.dot(incoming);
                uniform + cosine
            }
            MaterialKind::Reflective => {
                let incoming =
                    sample_microfacet_reflection(material.roughness, normal, outgoing, rng);
                color * self.trace(position, incoming, next, rng)
            }
            MaterialKind::Glossy => {
                let exponent = cospower_exponent(material.roughness);
                let halfway = sample_hemisphere_cospower(exponent, normal, rng.rand2f());
                if rng.rand1f() < fresnel_schlick(DIELECTRIC_SPECULAR, halfway, outgoing) {
                    let incoming = reflect(outgoing, halfway);
                    self.trace(position, incoming, next, rng)
                } else {
                    let incoming = sample_hemisphere_cos(normal, rng.rand2f());
                    color * self.trace(position, incoming, next, rng)
                }
            }
            MaterialKind::Transparent => {
                if rng.rand1f() < fresnel_schlick(DIELECTRIC_SPECULAR, normal, outgoing) {
                    let incoming = reflect(outgoing, normal);
                    self.trace(position, incoming, next, rng)
                } else {
                    color * self.trace(position, -outgoing, next, rng)
                }
            }
            MaterialKind::Refractive => {
                // Surfaces keep their authored side so exits can be told apart
                // from entries. Points and lines have no inside.
                let mut normal = match primitive {
                    PrimitiveKind::Triangle => shading_normal,
                    PrimitiveKind::Point | PrimitiveKind::Line => normal,
                };
                let mut eta = material.ior;
                let mut cos_theta = normal.dot(outgoing).min(1.0);
                if cos_theta < 0.0 {
                    // Leaving the medium
                    eta = 1.0 / eta;
                    normal = -normal;
                    cos_theta = -cos_theta;
                }
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

                let reflects = rng.rand1f() < fresnel_schlick(DIELECTRIC_SPECULAR, normal, outgoing)
                    || sin_theta / eta > 1.0
                    || reflectance(cos_theta, eta) > rng.rand1f();
                if reflects {
                    let incoming = reflect(outgoing, normal);
                    self.trace(position, incoming, next, rng)
                } else {
                    let incoming = refract(outgoing, normal, 1.0 / eta);
                    color * self.trace(position, incoming, next, rng)
                }
            }
        }
    }

    #[inline]
    fn trace(&self, origin: Vec3, direction: Vec3, depth: PathDepth, rng: &mut RngStream) -> Vec4 {
        self.radiance(&Ray::new(origin, direction), depth, rng)
    }
}

/// Diffuse-only path tracer: one cosine-weighted bounce per hit, no opacity.
pub fn shade_matte<S: SceneOracle + ?Sized>(
    scene: &S,
    ray: &Ray,
    bounce: u32,
    rng: &mut RngStream,
    config: &RenderConfig,
) -> Vec4 {
    let hit = scene.intersect(ray);
    if !hit.hit {
        return scene.environment(ray.direction()).extend(1.0);
    }

    let material = scene.material(&hit);
    let position = scene.position(&hit);
    let normal = scene.normal(&hit);
    let radiance = material.emission.extend(1.0);
    if bounce >= config.bounces {
        return radiance;
    }

    let incoming = sample_hemisphere_cos(normal, rng.rand2f());
    let next = Ray::new(position, incoming);
    radiance
        + material.color.extend(1.0) / PI
            * shade_matte(scene, &next, bounce + 1, rng, config)
            * normal.dot(incoming)
}

/// Headlight shading: base color scaled by the cosine to the viewer.
pub fn shade_eyelight<S: SceneOracle + ?Sized>(scene: &S, ray: &Ray) -> Vec4 {
    let hit = scene.intersect(ray);
    if !hit.hit {
        return Vec4::ZERO;
    }
    let color = scene.material(&hit).color.extend(1.0);
    color * scene.normal(&hit).dot(-ray.direction())
}

/// Normals remapped from [-1, 1] to [0, 1].
pub fn shade_normal<S: SceneOracle + ?Sized>(scene: &S, ray: &Ray) -> Vec4 {
    let hit = scene.intersect(ray);
    if !hit.hit {
        return Vec4::ZERO;
    }
    (scene.normal(&hit) * 0.5 + 0.5).extend(1.0)
}

/// Texture coordinates wrapped into [0, 1) in red and green.
pub fn shade_texcoord<S: SceneOracle + ?Sized>(scene: &S, ray: &Ray) -> Vec4 {
    let hit = scene.intersect(ray);
    if !hit.hit {
        return Vec4::ZERO;
    }
    let texcoord = scene.texcoord(&hit);
    Vec4::new(wrap_unit(texcoord.x), wrap_unit(texcoord.y), 0.0, 1.0)
}

/// `x` modulo 1 in [0, 1).
///
/// `rem_euclid` rounds up to exactly 1 for tiny negative inputs.
fn wrap_unit(x: f32) -> f32 {
    let wrapped = x.rem_euclid(1.0);
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Material base color.
pub fn shade_color<S: SceneOracle + ?Sized>(scene: &S, ray: &Ray) -> Vec4 {
    let hit = scene.intersect(ray);
    if !hit.hit {
        return Vec4::ZERO;
    }
    scene.material(&hit).color.extend(1.0)
}
