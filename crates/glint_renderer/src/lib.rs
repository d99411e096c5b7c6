//! Glint Renderer - progressive CPU path tracing.
//!
//! A Monte Carlo path tracer that refines an image one sample per pixel per
//! pass. The tracer talks to geometry only through [`SceneOracle`];
//! [`BvhScene`] is the bundled implementation over a `glint_core::Scene`.
//!
//! ```no_run
//! use glint_core::{Camera, Color, Environment, Instance, Material, Scene, Shape};
//! use glint_math::Vec3;
//! use glint_renderer::{render, BvhScene, RenderConfig};
//!
//! let mut scene = Scene::new("demo");
//! let quad = scene.add_shape(Shape::quad(1.0, 1.0));
//! let white = scene.add_material(Material::matte(Color::splat(0.8)));
//! scene.add_instance(Instance::new(quad, white));
//! scene.add_camera(Camera::look_at(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y));
//! scene.add_environment(Environment::sky());
//!
//! let oracle = BvhScene::new(&scene)?;
//! let _image = render(&oracle, &RenderConfig::default().with_quality(16, 4))?;
//! # Ok::<(), glint_renderer::RenderError>(())
//! ```

pub mod bvh;
pub mod bvh_scene;
pub mod camera;
pub mod config;
pub mod error;
pub mod image;
pub mod intersect;
pub mod oracle;
pub mod sampling;
pub mod scheduler;
pub mod shading;
pub mod state;
pub mod wet;

#[cfg(test)]
mod testing;

pub use bvh_scene::BvhScene;
pub use camera::eval_camera;
pub use config::{RenderConfig, ShaderKind, WetWeights};
pub use error::{RenderError, RenderResult};
pub use image::{color_to_rgba, ImageBuffer};
pub use oracle::{HitRecord, SceneOracle};
pub use sampling::RngStream;
pub use scheduler::{advance_pass, render, render_with_progress, PassOutcome};
pub use shading::shade;
pub use state::RenderState;
