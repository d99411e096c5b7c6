//! Glint Core - renderer-agnostic scene description.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Instance`, `Shape`, `Material`, `Camera`, `Environment`
//! - **Attribute evaluation**: world-space position, normal and texcoord lookup
//!   at an element-local uv, as reported by an intersector
//!
//! # Example
//!
//! ```
//! use glint_core::{Color, Instance, Material, Scene, Shape};
//!
//! let mut scene = Scene::new("example");
//! let quad = scene.add_shape(Shape::quad(1.0, 1.0));
//! let light = scene.add_material(Material::emitter(Color::ONE));
//! scene.add_instance(Instance::new(quad, light));
//! assert!(scene.validate().is_ok());
//! ```

pub mod camera;
pub mod environment;
pub mod error;
pub mod material;
pub mod scene;
pub mod shape;

// Re-export commonly used types
pub use camera::Camera;
pub use environment::Environment;
pub use error::{SceneError, SceneResult};
pub use material::{Color, Material, MaterialKind, WetRole};
pub use scene::{Instance, Scene};
pub use shape::{Elements, PrimitiveKind, Shape};
