//! Scene graph types for Glint.
//!
//! A scene is a flat list of instances, each placing a shared shape with a
//! material in world space, plus cameras and environments.

use glint_math::{Mat4, Mat4Ext, Vec2, Vec3};

use crate::camera::Camera;
use crate::environment::Environment;
use crate::error::{SceneError, SceneResult};
use crate::material::{Color, Material};
use crate::shape::Shape;

/// A shape placed in the world with a material.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    /// Local-to-world frame
    pub frame: Mat4,

    /// Index into `Scene::shapes`
    pub shape: usize,

    /// Index into `Scene::materials`
    pub material: usize,
}

impl Instance {
    pub fn new(shape: usize, material: usize) -> Self {
        Self {
            frame: Mat4::IDENTITY,
            shape,
            material,
        }
    }

    pub fn with_frame(mut self, frame: Mat4) -> Self {
        self.frame = frame;
        self
    }
}

/// A complete scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub name: String,
    pub cameras: Vec<Camera>,
    pub shapes: Vec<Shape>,
    pub materials: Vec<Material>,
    pub instances: Vec<Instance>,
    pub environments: Vec<Environment>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a camera and return its index.
    pub fn add_camera(&mut self, camera: Camera) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    /// Add a shape and return its index.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Add a material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add an instance and return its index.
    pub fn add_instance(&mut self, instance: Instance) -> usize {
        self.instances.push(instance);
        self.instances.len() - 1
    }

    pub fn add_environment(&mut self, environment: Environment) {
        self.environments.push(environment);
    }

    /// Total element count across all instances.
    pub fn element_count(&self) -> usize {
        self.instances
            .iter()
            .filter_map(|instance| self.shapes.get(instance.shape))
            .map(Shape::element_count)
            .sum()
    }

    /// Check that every instance references an existing shape and material and
    /// that every element indexes existing vertices.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, instance) in self.instances.iter().enumerate() {
            if instance.shape >= self.shapes.len() {
                return Err(SceneError::MissingShape {
                    instance: index,
                    shape: instance.shape,
                });
            }
            if instance.material >= self.materials.len() {
                return Err(SceneError::MissingMaterial {
                    instance: index,
                    material: instance.material,
                });
            }
        }

        for (shape_index, shape) in self.shapes.iter().enumerate() {
            let count = shape.positions.len();
            for element in 0..shape.element_count() {
                if let Some(&vertex) = shape
                    .element_vertices(element)
                    .iter()
                    .find(|&&v| v as usize >= count)
                {
                    return Err(SceneError::VertexOutOfRange {
                        shape: shape_index,
                        element,
                        vertex,
                        count,
                    });
                }
            }
        }

        Ok(())
    }

    /// World-space position on an instance element.
    pub fn eval_position(&self, instance: usize, element: usize, uv: Vec2) -> Vec3 {
        let instance = &self.instances[instance];
        let position = self.shapes[instance.shape].eval_position(element, uv);
        instance.frame.transform_point3(position)
    }

    /// World-space unit normal on an instance element.
    pub fn eval_normal(&self, instance: usize, element: usize, uv: Vec2) -> Vec3 {
        let instance = &self.instances[instance];
        let normal = self.shapes[instance.shape].eval_normal(element, uv);
        instance.frame.transform_normal(normal)
    }

    pub fn eval_texcoord(&self, instance: usize, element: usize, uv: Vec2) -> Vec2 {
        let instance = &self.instances[instance];
        self.shapes[instance.shape].eval_texcoord(element, uv)
    }

    /// Material bound to an instance.
    pub fn eval_material(&self, instance: usize) -> &Material {
        &self.materials[self.instances[instance].material]
    }

    /// Sum of all environments along `direction`; black when there are none.
    pub fn eval_environment(&self, direction: Vec3) -> Color {
        self.environments
            .iter()
            .map(|environment| environment.eval(direction))
            .fold(Color::ZERO, |acc, radiance| acc + radiance)
    }
}
