//! Shape geometry: points, lines or triangles over shared vertex arrays.
//!
//! Attribute evaluation takes an element index and the element-local `uv`
//! reported by the intersector (barycentrics for triangles, the segment
//! parameter in `u` for lines) and returns object-space values.

use glint_math::{Aabb, Vec2, Vec3};

/// Kind of primitive a shape is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Point,
    Line,
    Triangle,
}

/// Element connectivity. A shape holds a single primitive kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Elements {
    Points(Vec<u32>),
    Lines(Vec<[u32; 2]>),
    Triangles(Vec<[u32; 3]>),
}

impl Elements {
    pub fn len(&self) -> usize {
        match self {
            Elements::Points(points) => points.len(),
            Elements::Lines(lines) => lines.len(),
            Elements::Triangles(triangles) => triangles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Geometry with per-vertex attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub elements: Elements,

    /// Vertex positions (object space)
    pub positions: Vec<Vec3>,

    /// Vertex normals (empty = use geometric normals)
    pub normals: Vec<Vec3>,

    /// Texture coordinates (empty = use the element uv)
    pub texcoords: Vec<Vec2>,

    /// Per-vertex radius for points and lines
    pub radius: Vec<f32>,
}

impl Shape {
    fn from_elements(elements: Elements, positions: Vec<Vec3>) -> Self {
        Self {
            elements,
            positions,
            normals: Vec::new(),
            texcoords: Vec::new(),
            radius: Vec::new(),
        }
    }

    pub fn triangles(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self::from_elements(Elements::Triangles(triangles), positions)
    }

    /// Points with a uniform radius.
    pub fn points(positions: Vec<Vec3>, radius: f32) -> Self {
        let points = (0..positions.len() as u32).collect();
        let count = positions.len();
        Self {
            radius: vec![radius; count],
            ..Self::from_elements(Elements::Points(points), positions)
        }
    }

    /// Line segments with a uniform radius.
    pub fn lines(positions: Vec<Vec3>, lines: Vec<[u32; 2]>, radius: f32) -> Self {
        let count = positions.len();
        Self {
            radius: vec![radius; count],
            ..Self::from_elements(Elements::Lines(lines), positions)
        }
    }

    /// Axis-aligned quad in the XY plane facing +Z, centered at the origin.
    pub fn quad(half_width: f32, half_height: f32) -> Self {
        let positions = vec![
            Vec3::new(-half_width, -half_height, 0.0),
            Vec3::new(half_width, -half_height, 0.0),
            Vec3::new(half_width, half_height, 0.0),
            Vec3::new(-half_width, half_height, 0.0),
        ];
        let texcoords = vec![
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ];
        Self {
            normals: vec![Vec3::Z; 4],
            texcoords,
            ..Self::triangles(positions, vec![[0, 1, 2], [0, 2, 3]])
        }
    }

    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = normals;
        self
    }

    pub fn with_texcoords(mut self, texcoords: Vec<Vec2>) -> Self {
        self.texcoords = texcoords;
        self
    }

    pub fn primitive_kind(&self) -> PrimitiveKind {
        match self.elements {
            Elements::Points(_) => PrimitiveKind::Point,
            Elements::Lines(_) => PrimitiveKind::Line,
            Elements::Triangles(_) => PrimitiveKind::Triangle,
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Radius at a vertex (0 when none was given).
    pub fn vertex_radius(&self, vertex: u32) -> f32 {
        self.radius.get(vertex as usize).copied().unwrap_or(0.0)
    }

    /// Vertex indices of an element, as a slice of 1, 2 or 3 entries.
    pub fn element_vertices(&self, element: usize) -> &[u32] {
        match &self.elements {
            Elements::Points(points) => std::slice::from_ref(&points[element]),
            Elements::Lines(lines) => &lines[element],
            Elements::Triangles(triangles) => &triangles[element],
        }
    }

    /// Object-space bounds of one element, including point/line radius.
    pub fn element_bounds(&self, element: usize) -> Aabb {
        let vertices = self.element_vertices(element);
        let points: Vec<Vec3> = vertices
            .iter()
            .map(|&v| self.positions[v as usize])
            .collect();
        let radius = vertices
            .iter()
            .map(|&v| self.vertex_radius(v))
            .fold(0.0_f32, f32::max);
        Aabb::from_point_cloud(&points, radius)
    }

    /// Object-space position at an element-local uv.
    pub fn eval_position(&self, element: usize, uv: Vec2) -> Vec3 {
        match &self.elements {
            Elements::Points(points) => self.positions[points[element] as usize],
            Elements::Lines(lines) => {
                let [a, b] = lines[element];
                interpolate_line(self.positions[a as usize], self.positions[b as usize], uv.x)
            }
            Elements::Triangles(triangles) => {
                let [a, b, c] = triangles[element];
                interpolate_triangle(
                    self.positions[a as usize],
                    self.positions[b as usize],
                    self.positions[c as usize],
                    uv,
                )
            }
        }
    }

    /// Object-space unit normal at an element-local uv.
    ///
    /// Falls back to geometric normals when the shape has no vertex normals:
    /// the face normal for triangles, the segment tangent for lines and +Z for points.
    pub fn eval_normal(&self, element: usize, uv: Vec2) -> Vec3 {
        if !self.normals.is_empty() {
            let normal = match &self.elements {
                Elements::Points(points) => self.normals[points[element] as usize],
                Elements::Lines(lines) => {
                    let [a, b] = lines[element];
                    interpolate_line(self.normals[a as usize], self.normals[b as usize], uv.x)
                }
                Elements::Triangles(triangles) => {
                    let [a, b, c] = triangles[element];
                    interpolate_triangle(
                        self.normals[a as usize],
                        self.normals[b as usize],
                        self.normals[c as usize],
                        uv,
                    )
                }
            };
            return normal.normalize();
        }

        match &self.elements {
            Elements::Points(_) => Vec3::Z,
            Elements::Lines(lines) => {
                let [a, b] = lines[element];
                (self.positions[b as usize] - self.positions[a as usize]).normalize()
            }
            Elements::Triangles(triangles) => {
                let [a, b, c] = triangles[element];
                let p0 = self.positions[a as usize];
                let p1 = self.positions[b as usize];
                let p2 = self.positions[c as usize];
                (p1 - p0).cross(p2 - p0).normalize()
            }
        }
    }

    /// Texture coordinate at an element-local uv (the uv itself when the shape
    /// carries no texcoords).
    pub fn eval_texcoord(&self, element: usize, uv: Vec2) -> Vec2 {
        if self.texcoords.is_empty() {
            return uv;
        }
        match &self.elements {
            Elements::Points(points) => self.texcoords[points[element] as usize],
            Elements::Lines(lines) => {
                let [a, b] = lines[element];
                interpolate_line(self.texcoords[a as usize], self.texcoords[b as usize], uv.x)
            }
            Elements::Triangles(triangles) => {
                let [a, b, c] = triangles[element];
                interpolate_triangle(
                    self.texcoords[a as usize],
                    self.texcoords[b as usize],
                    self.texcoords[c as usize],
                    uv,
                )
            }
        }
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Only meaningful for triangle shapes; other shapes are left untouched.
    pub fn compute_normals(&mut self) {
        let Elements::Triangles(triangles) = &self.elements else {
            return;
        };

        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for &[a, b, c] in triangles {
            let p0 = self.positions[a as usize];
            let p1 = self.positions[b as usize];
            let p2 = self.positions[c as usize];
            let face_normal = (p1 - p0).cross(p2 - p0);

            normals[a as usize] += face_normal;
            normals[b as usize] += face_normal;
            normals[c as usize] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.try_normalize().unwrap_or(Vec3::Z);
        }

        self.normals = normals;
    }
}

#[inline]
fn interpolate_line<T>(a: T, b: T, u: f32) -> T
where
    T: std::ops::Mul<f32, Output = T> + std::ops::Add<Output = T>,
{
    a * (1.0 - u) + b * u
}

#[inline]
fn interpolate_triangle<T>(a: T, b: T, c: T, uv: Vec2) -> T
where
    T: std::ops::Mul<f32, Output = T> + std::ops::Add<Output = T>,
{
    a * (1.0 - uv.x - uv.y) + b * uv.x + c * uv.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Shape {
        Shape::triangles(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]])
    }

    #[test]
    fn test_triangle_interpolation() {
        let shape = triangle();

        assert_eq!(shape.eval_position(0, Vec2::ZERO), Vec3::ZERO);
        assert_eq!(shape.eval_position(0, Vec2::new(1.0, 0.0)), Vec3::X);
        assert_eq!(shape.eval_position(0, Vec2::new(0.0, 1.0)), Vec3::Y);
        assert_eq!(shape.eval_position(0, Vec2::new(0.5, 0.5)), Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_geometric_normal_fallback() {
        let shape = triangle();
        assert_eq!(shape.eval_normal(0, Vec2::new(0.2, 0.2)), Vec3::Z);
        assert_eq!(shape.eval_texcoord(0, Vec2::new(0.2, 0.3)), Vec2::new(0.2, 0.3));
    }

    #[test]
    fn test_quad_attributes() {
        let quad = Shape::quad(1.0, 1.0);

        assert_eq!(quad.primitive_kind(), PrimitiveKind::Triangle);
        assert_eq!(quad.element_count(), 2);
        assert_eq!(quad.eval_normal(1, Vec2::new(0.3, 0.3)), Vec3::Z);
        // Second vertex of the first triangle is the bottom-right corner
        assert_eq!(quad.eval_texcoord(0, Vec2::new(1.0, 0.0)), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_points_and_lines() {
        let points = Shape::points(vec![Vec3::ZERO, Vec3::ONE], 0.1);
        assert_eq!(points.primitive_kind(), PrimitiveKind::Point);
        assert_eq!(points.eval_position(1, Vec2::ZERO), Vec3::ONE);
        assert_eq!(points.vertex_radius(0), 0.1);

        let lines = Shape::lines(vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)], vec![[0, 1]], 0.05);
        assert_eq!(lines.primitive_kind(), PrimitiveKind::Line);
        assert_eq!(lines.eval_position(0, Vec2::new(0.25, 0.0)), Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(lines.eval_normal(0, Vec2::ZERO), Vec3::X);
    }

    #[test]
    fn test_element_bounds_include_radius() {
        let points = Shape::points(vec![Vec3::ZERO], 0.5);
        let bounds = points.element_bounds(0);
        assert_eq!(bounds.x.min, -0.5);
        assert_eq!(bounds.y.max, 0.5);
    }

    #[test]
    fn test_compute_normals() {
        let mut shape = triangle();
        shape.compute_normals();
        assert_eq!(shape.normals, vec![Vec3::Z; 3]);
    }
}
