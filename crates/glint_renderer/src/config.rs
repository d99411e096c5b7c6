//! Render configuration.

use std::fmt;
use std::str::FromStr;

use glint_core::WetRole;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Which estimator to run per pixel sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderKind {
    /// Full path tracing over all material behaviors
    #[default]
    Raytrace,
    /// Diffuse-only path tracing
    Matte,
    /// Headlight shading, no bounces
    Eyelight,
    /// Normals as colors
    Normal,
    /// Texture coordinates as colors
    Texcoord,
    /// Material base color
    Color,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 6] = [
        ShaderKind::Raytrace,
        ShaderKind::Matte,
        ShaderKind::Eyelight,
        ShaderKind::Normal,
        ShaderKind::Texcoord,
        ShaderKind::Color,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShaderKind::Raytrace => "raytrace",
            ShaderKind::Matte => "matte",
            ShaderKind::Eyelight => "eyelight",
            ShaderKind::Normal => "normal",
            ShaderKind::Texcoord => "texcoord",
            ShaderKind::Color => "color",
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShaderKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShaderKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RenderError::UnknownShader(s.to_string()))
    }
}

/// Wet-overlay blend weight per material role.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WetWeights {
    pub primary: f32,
    pub secondary: f32,
}

impl Default for WetWeights {
    fn default() -> Self {
        Self {
            primary: 0.75,
            secondary: 0.30,
        }
    }
}

impl WetWeights {
    pub fn weight(&self, role: WetRole) -> f32 {
        match role {
            WetRole::Primary => self.primary,
            WetRole::Secondary => self.secondary,
        }
    }
}

/// Render configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum bounce depth; paths are truncated there
    pub bounces: u32,
    /// Number of passes (samples per pixel) to accumulate
    pub samples: u32,
    pub shader: ShaderKind,
    /// Fan pixels out over the rayon thread pool
    pub parallel: bool,
    /// Seed for the per-pixel random streams
    pub seed: u64,
    /// Index of the scene camera to render from
    pub camera: usize,
    /// Length of the longer image side in pixels
    pub resolution: u32,
    /// Enable the wet-surface overlay
    pub wet: bool,
    pub wet_weights: WetWeights,
    /// Maximum number of opacity pass-through hops along one path
    pub max_passthrough: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bounces: 4,
            samples: 512,
            shader: ShaderKind::Raytrace,
            parallel: true,
            seed: 961_748_941,
            camera: 0,
            resolution: 720,
            wet: false,
            wet_weights: WetWeights::default(),
            max_passthrough: 64,
        }
    }
}

impl RenderConfig {
    pub fn with_shader(mut self, shader: ShaderKind) -> Self {
        self.shader = shader;
        self
    }

    pub fn with_quality(mut self, samples: u32, bounces: u32) -> Self {
        self.samples = samples;
        self.bounces = bounces;
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_camera(mut self, camera: usize) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_wet(mut self, wet: bool) -> Self {
        self.wet = wet;
        self
    }

    /// Reject values no render can run with.
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples == 0 {
            return Err(RenderError::InvalidConfig("samples must be at least 1".into()));
        }
        if self.resolution == 0 {
            return Err(RenderError::InvalidConfig("resolution must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_names() {
        for kind in ShaderKind::ALL {
            assert_eq!(kind.to_string().parse::<ShaderKind>(), Ok(kind));
        }
        assert_eq!(
            "pathtrace".parse::<ShaderKind>(),
            Err(RenderError::UnknownShader("pathtrace".into()))
        );
    }

    #[test]
    fn test_wet_weights() {
        let weights = WetWeights::default();
        assert_eq!(weights.weight(WetRole::Primary), 0.75);
        assert_eq!(weights.weight(WetRole::Secondary), 0.30);
    }

    #[test]
    fn test_validate() {
        assert!(RenderConfig::default().validate().is_ok());
        assert!(RenderConfig::default().with_quality(0, 4).validate().is_err());
        assert!(RenderConfig::default().with_resolution(0).validate().is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"shader": "eyelight", "samples": 16, "wet": true}"#).unwrap();

        assert_eq!(config.shader, ShaderKind::Eyelight);
        assert_eq!(config.samples, 16);
        assert!(config.wet);
        assert_eq!(config.bounces, RenderConfig::default().bounces);
        assert_eq!(config.wet_weights, WetWeights::default());
    }

    #[test]
    fn test_config_rejects_unknown_shader_in_json() {
        let result = serde_json::from_str::<RenderConfig>(r#"{"shader": "toon"}"#);
        assert!(result.is_err());
    }
}
