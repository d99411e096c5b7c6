//! Reference [`SceneOracle`] over a [`glint_core::Scene`].
//!
//! Instances are flattened into world space once at build time and indexed by
//! a single BVH. Attribute lookup is delegated to the scene.

use glint_core::{Camera, Color, Material, PrimitiveKind, Scene, SceneResult, Shape};
use glint_math::{Aabb, Interval, Ray, Vec2, Vec3};

use crate::bvh::{BvhNode, PrimitiveRef};
use crate::intersect::{intersect_line, intersect_point, intersect_triangle};
use crate::oracle::{HitRecord, SceneOracle};

/// A scene prepared for ray queries.
pub struct BvhScene<'a> {
    scene: &'a Scene,
    bvh: BvhNode,
    /// World-space vertex positions, per instance
    positions: Vec<Vec<Vec3>>,
}

impl<'a> BvhScene<'a> {
    /// Validate `scene` and build its BVH.
    pub fn new(scene: &'a Scene) -> SceneResult<Self> {
        scene.validate()?;

        let positions: Vec<Vec<Vec3>> = scene
            .instances
            .iter()
            .map(|instance| {
                scene.shapes[instance.shape]
                    .positions
                    .iter()
                    .map(|&p| instance.frame.transform_point3(p))
                    .collect()
            })
            .collect();

        let mut primitives = Vec::with_capacity(scene.element_count());
        for (index, instance) in scene.instances.iter().enumerate() {
            let shape = &scene.shapes[instance.shape];
            for element in 0..shape.element_count() {
                primitives.push(PrimitiveRef {
                    instance: index,
                    element,
                    bbox: world_bounds(shape, &positions[index], element),
                });
            }
        }

        log::info!(
            "Built BVH for scene '{}': {} instances, {} primitives",
            scene.name,
            scene.instances.len(),
            primitives.len()
        );

        Ok(Self {
            scene,
            bvh: BvhNode::new(primitives),
            positions,
        })
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// Bounds of all geometry.
    pub fn bounding_box(&self) -> Aabb {
        self.bvh.bounding_box()
    }

    fn hit_primitive(&self, primitive: &PrimitiveRef, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let shape = &self.scene.shapes[self.scene.instances[primitive.instance].shape];
        let positions = &self.positions[primitive.instance];
        let vertices = shape.element_vertices(primitive.element);
        let position = |i: usize| positions[vertices[i] as usize];
        let radius = |i: usize| shape.vertex_radius(vertices[i]);

        let (uv, distance) = match shape.primitive_kind() {
            PrimitiveKind::Point => intersect_point(ray, ray_t, position(0), radius(0))?,
            PrimitiveKind::Line => {
                intersect_line(ray, ray_t, position(0), position(1), radius(0), radius(1))?
            }
            PrimitiveKind::Triangle => {
                intersect_triangle(ray, ray_t, position(0), position(1), position(2))?
            }
        };

        Some(HitRecord::new(primitive.instance, primitive.element, uv, distance))
    }
}

fn world_bounds(shape: &Shape, positions: &[Vec3], element: usize) -> Aabb {
    let vertices = shape.element_vertices(element);
    let points: Vec<Vec3> = vertices.iter().map(|&v| positions[v as usize]).collect();
    let radius = vertices
        .iter()
        .map(|&v| shape.vertex_radius(v))
        .fold(0.0_f32, f32::max);
    Aabb::from_point_cloud(&points, radius)
}

impl SceneOracle for BvhScene<'_> {
    fn intersect(&self, ray: &Ray) -> HitRecord {
        let hit = |primitive: &PrimitiveRef, ray: &Ray, ray_t: Interval| {
            self.hit_primitive(primitive, ray, ray_t)
        };
        self.bvh.intersect(ray, ray.range(), &hit)
    }

    fn position(&self, hit: &HitRecord) -> Vec3 {
        self.scene.eval_position(hit.instance, hit.element, hit.uv)
    }

    fn normal(&self, hit: &HitRecord) -> Vec3 {
        self.scene.eval_normal(hit.instance, hit.element, hit.uv)
    }

    fn material(&self, hit: &HitRecord) -> &Material {
        self.scene.eval_material(hit.instance)
    }

    fn texcoord(&self, hit: &HitRecord) -> Vec2 {
        self.scene.eval_texcoord(hit.instance, hit.element, hit.uv)
    }

    fn primitive(&self, hit: &HitRecord) -> PrimitiveKind {
        let instance = &self.scene.instances[hit.instance];
        self.scene.shapes[instance.shape].primitive_kind()
    }

    fn environment(&self, direction: Vec3) -> Color {
        self.scene.eval_environment(direction)
    }

    fn camera(&self, index: usize) -> Option<&Camera> {
        self.scene.cameras.get(index)
    }
}
