//! Analytic scenes for shader and scheduler tests.

use glint_core::{Camera, Color, Environment, Material, PrimitiveKind};
use glint_math::{Ray, Vec2, Vec3};

use crate::oracle::{HitRecord, SceneOracle};

/// An infinite plane at y = 0 with normal +Y and texcoords `(x, z)`.
///
/// A stacked plane is hit one unit in front of every ray, however often the
/// ray continues. An empty plane scene hits nothing. Hits report triangles
/// unless another primitive kind is set.
pub struct PlaneScene {
    material: Material,
    environment: Environment,
    layout: Layout,
    primitive: PrimitiveKind,
    cameras: Vec<Camera>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Layout {
    Plane,
    Stacked,
    Empty,
}

impl PlaneScene {
    pub fn new(material: Material, environment: Environment) -> Self {
        Self {
            material,
            environment,
            layout: Layout::Plane,
            primitive: PrimitiveKind::Triangle,
            cameras: vec![Camera::default()],
        }
    }

    pub fn stacked(material: Material, environment: Environment) -> Self {
        Self {
            layout: Layout::Stacked,
            ..Self::new(material, environment)
        }
    }

    pub fn empty(environment: Environment) -> Self {
        Self {
            layout: Layout::Empty,
            ..Self::new(Material::default(), environment)
        }
    }

    pub fn with_primitive(mut self, primitive: PrimitiveKind) -> Self {
        self.primitive = primitive;
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.cameras = vec![camera];
        self
    }
}

impl SceneOracle for PlaneScene {
    fn intersect(&self, ray: &Ray) -> HitRecord {
        let distance = match self.layout {
            Layout::Empty => return HitRecord::MISS,
            Layout::Stacked => 1.0,
            Layout::Plane => {
                if ray.direction().y == 0.0 {
                    return HitRecord::MISS;
                }
                -ray.origin().y / ray.direction().y
            }
        };
        if !ray.range().surrounds(distance) {
            return HitRecord::MISS;
        }
        let position = ray.at(distance);
        HitRecord::new(0, 0, Vec2::new(position.x, position.z), distance)
    }

    fn position(&self, hit: &HitRecord) -> Vec3 {
        Vec3::new(hit.uv.x, 0.0, hit.uv.y)
    }

    fn normal(&self, _hit: &HitRecord) -> Vec3 {
        Vec3::Y
    }

    fn material(&self, _hit: &HitRecord) -> &Material {
        &self.material
    }

    fn texcoord(&self, hit: &HitRecord) -> Vec2 {
        hit.uv
    }

    fn primitive(&self, _hit: &HitRecord) -> PrimitiveKind {
        self.primitive
    }

    fn environment(&self, direction: Vec3) -> Color {
        self.environment.eval(direction)
    }

    fn camera(&self, index: usize) -> Option<&Camera> {
        self.cameras.get(index)
    }
}
