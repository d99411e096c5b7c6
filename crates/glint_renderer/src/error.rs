//! Render errors.

use glint_core::SceneError;
use thiserror::Error;

/// Errors that can occur while configuring or running a render.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Unknown shader: {0}")]
    UnknownShader(String),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Camera {0} not found in scene")]
    MissingCamera(usize),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Image size mismatch: render is {expected_width}x{expected_height}, buffer is {width}x{height}")]
    SizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("No samples have been accumulated yet")]
    NoSamples,
}

impl RenderError {
    /// Configuration faults abort the render; the other errors leave the
    /// render state usable and can be retried by the caller.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RenderError::UnknownShader(_)
                | RenderError::InvalidConfig(_)
                | RenderError::MissingCamera(_)
                | RenderError::Scene(_)
        )
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(RenderError::UnknownShader("toon".into()).is_fatal());
        assert!(RenderError::Scene(SceneError::UnknownMaterialTag(9)).is_fatal());
        assert!(!RenderError::NoSamples.is_fatal());
        assert!(!RenderError::SizeMismatch {
            expected_width: 4,
            expected_height: 4,
            width: 2,
            height: 2
        }
        .is_fatal());
    }

    #[test]
    fn test_scene_error_conversion() {
        let err: RenderError = SceneError::UnknownMaterial("velvet".into()).into();
        assert_eq!(err.to_string(), "Scene error: Unknown material type: velvet");
    }
}
