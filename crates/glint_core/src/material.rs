//! Surface materials.
//!
//! The five transport behaviors form a closed set; the path tracer matches on
//! [`MaterialKind`] directly.

use std::fmt;
use std::str::FromStr;

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Color type alias (linear RGB)
pub type Color = Vec3;

/// Light transport behavior of a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Diffuse surface
    #[default]
    Matte,
    /// Metal, mirror when roughness is 0
    Reflective,
    /// Rough plastic: Fresnel-weighted mix of specular and diffuse
    Glossy,
    /// Thin non-refracting sheet
    Transparent,
    /// Glass-like dielectric
    Refractive,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 5] = [
        MaterialKind::Matte,
        MaterialKind::Reflective,
        MaterialKind::Glossy,
        MaterialKind::Transparent,
        MaterialKind::Refractive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MaterialKind::Matte => "matte",
            MaterialKind::Reflective => "reflective",
            MaterialKind::Glossy => "glossy",
            MaterialKind::Transparent => "transparent",
            MaterialKind::Refractive => "refractive",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaterialKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SceneError::UnknownMaterial(s.to_string()))
    }
}

/// Numeric tags as stored by scene files.
impl TryFrom<u8> for MaterialKind {
    type Error = SceneError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        MaterialKind::ALL
            .get(tag as usize)
            .copied()
            .ok_or(SceneError::UnknownMaterialTag(tag))
    }
}

/// Selects the wet-overlay blend weight applied to a material.
///
/// Scenes usually tag their ground or backdrop material as `Primary`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WetRole {
    Primary,
    #[default]
    Secondary,
}

/// A surface material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub name: String,

    pub kind: MaterialKind,

    /// Base color (RGB, 0-1)
    pub color: Color,

    /// Emitted radiance
    pub emission: Color,

    /// Roughness (0 = smooth, 1 = rough)
    pub roughness: f32,

    /// Index of refraction
    pub ior: f32,

    /// Opacity (0 = fully see-through, 1 = opaque)
    pub opacity: f32,

    pub wet_role: WetRole,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: MaterialKind::Matte,
            color: Color::ZERO,
            emission: Color::ZERO,
            roughness: 0.0,
            ior: 1.5,
            opacity: 1.0,
            wet_role: WetRole::Secondary,
        }
    }
}

impl Material {
    /// Create a material of the given kind and color.
    pub fn new(kind: MaterialKind, color: Color) -> Self {
        Self {
            kind,
            color,
            ..Default::default()
        }
    }

    pub fn matte(color: Color) -> Self {
        Self::new(MaterialKind::Matte, color)
    }

    pub fn reflective(color: Color, roughness: f32) -> Self {
        Self::new(MaterialKind::Reflective, color).with_roughness(roughness)
    }

    pub fn glossy(color: Color, roughness: f32) -> Self {
        Self::new(MaterialKind::Glossy, color).with_roughness(roughness)
    }

    pub fn transparent(color: Color) -> Self {
        Self::new(MaterialKind::Transparent, color)
    }

    pub fn refractive(color: Color, ior: f32) -> Self {
        Self {
            ior,
            ..Self::new(MaterialKind::Refractive, color)
        }
    }

    /// A black matte surface that only emits.
    pub fn emitter(emission: Color) -> Self {
        Self {
            emission,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_wet_role(mut self, role: WetRole) -> Self {
        self.wet_role = role;
        self
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.length_squared() > 0.0
    }
}
