//! Errors raised while building or validating a scene.

use thiserror::Error;

/// Errors that can occur while describing a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Unknown material type: {0}")]
    UnknownMaterial(String),

    #[error("Unknown material tag: {0}")]
    UnknownMaterialTag(u8),

    #[error("Instance {instance} references missing shape {shape}")]
    MissingShape { instance: usize, shape: usize },

    #[error("Instance {instance} references missing material {material}")]
    MissingMaterial { instance: usize, material: usize },

    #[error("Shape {shape} element {element} indexes vertex {vertex} out of {count}")]
    VertexOutOfRange {
        shape: usize,
        element: usize,
        vertex: u32,
        count: usize,
    },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
