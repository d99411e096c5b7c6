//! Bounding Volume Hierarchy (BVH) over scene elements.
//!
//! Leaves store references to instance elements; the caller supplies the
//! primitive test, so the tree itself knows nothing about shapes.

use glint_math::{Aabb, Interval, Ray};

use crate::oracle::HitRecord;

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// One element of one instance, with its world-space bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveRef {
    pub instance: usize,
    pub element: usize,
    pub bbox: Aabb,
}

/// BVH node - either a branch with two children or a leaf with primitives.
#[derive(Debug)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf {
        primitives: Vec<PrimitiveRef>,
        bbox: Aabb,
    },
    /// Empty node (for scenes without geometry).
    Empty,
}

impl BvhNode {
    /// Create a BVH from a list of primitives.
    pub fn new(primitives: Vec<PrimitiveRef>) -> Self {
        if primitives.is_empty() {
            return BvhNode::Empty;
        }
        Self::build(primitives)
    }

    /// Simple median split: sort by centroid on the longest centroid axis,
    /// split in half, recurse.
    fn build(mut primitives: Vec<PrimitiveRef>) -> Self {
        let n = primitives.len();

        let bounds = primitives
            .iter()
            .fold(Aabb::EMPTY, |acc, p| Aabb::surrounding(&acc, &p.bbox));

        if n <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                primitives,
                bbox: bounds,
            };
        }

        let centroid_bounds = primitives.iter().fold(Aabb::EMPTY, |acc, p| {
            let c = p.bbox.centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        primitives.sort_unstable_by(|a, b| {
            let a_val = a.bbox.centroid()[axis];
            let b_val = b.bbox.centroid()[axis];
            a_val.partial_cmp(&b_val).unwrap_or(std::cmp::Ordering::Equal)
        });

        let right_primitives = primitives.split_off(n / 2);
        let left = Self::build(primitives);
        let right = Self::build(right_primitives);

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox: bounds,
        }
    }

    /// Closest hit along `ray` within `ray_t`.
    ///
    /// `hit_primitive` tests one primitive against the ray in a given range.
    pub fn intersect<F>(&self, ray: &Ray, ray_t: Interval, hit_primitive: &F) -> HitRecord
    where
        F: Fn(&PrimitiveRef, &Ray, Interval) -> Option<HitRecord>,
    {
        let mut closest = HitRecord::MISS;
        self.intersect_into(ray, ray_t, hit_primitive, &mut closest);
        closest
    }

    fn intersect_into<F>(&self, ray: &Ray, ray_t: Interval, hit_primitive: &F, rec: &mut HitRecord) -> bool
    where
        F: Fn(&PrimitiveRef, &Ray, Interval) -> Option<HitRecord>,
    {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { primitives, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let mut hit_anything = false;
                let mut closest = ray_t.max;
                for primitive in primitives {
                    if let Some(hit) = hit_primitive(primitive, ray, ray_t.with_max(closest)) {
                        hit_anything = true;
                        closest = hit.distance;
                        *rec = hit;
                    }
                }
                hit_anything
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.intersect_into(ray, ray_t, hit_primitive, rec);

                // Only check right up to closest hit
                let right_max = if hit_left { rec.distance } else { ray_t.max };
                let hit_right = right.intersect_into(ray, ray_t.with_max(right_max), hit_primitive, rec);

                hit_left || hit_right
            }
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::{Vec2, Vec3};

    /// Unit boxes along X, one per primitive; hits report the box center distance.
    fn boxes(count: usize) -> Vec<PrimitiveRef> {
        (0..count)
            .map(|i| {
                let center = Vec3::new(i as f32 * 2.0, 0.0, -5.0);
                PrimitiveRef {
                    instance: 0,
                    element: i,
                    bbox: Aabb::from_points(center - 0.5, center + 0.5),
                }
            })
            .collect()
    }

    fn hit_box(primitive: &PrimitiveRef, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        if !primitive.bbox.hit(ray, ray_t) {
            return None;
        }
        let t = (primitive.bbox.z.max - ray.origin().z) / ray.direction().z;
        ray_t
            .contains(t)
            .then(|| HitRecord::new(primitive.instance, primitive.element, Vec2::ZERO, t))
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BvhNode::new(vec![]);
        assert!(matches!(bvh, BvhNode::Empty));

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(!bvh.intersect(&ray, ray.range(), &hit_box).hit);
    }

    #[test]
    fn test_bvh_single_leaf() {
        let bvh = BvhNode::new(boxes(3));
        assert!(matches!(bvh, BvhNode::Leaf { .. }));
    }

    #[test]
    fn test_bvh_finds_each_box() {
        let bvh = BvhNode::new(boxes(20));
        assert!(matches!(bvh, BvhNode::Branch { .. }));

        for i in 0..20 {
            let ray = Ray::new(Vec3::new(i as f32 * 2.0, 0.0, 0.0), -Vec3::Z);
            let hit = bvh.intersect(&ray, ray.range(), &hit_box);
            assert!(hit.hit);
            assert_eq!(hit.element, i);
            assert!((hit.distance - 4.5).abs() < 1e-5);
        }

        let between = Ray::new(Vec3::new(1.0, 0.0, 0.0), -Vec3::Z);
        assert!(!bvh.intersect(&between, between.range(), &hit_box).hit);
    }

    #[test]
    fn test_bvh_returns_closest() {
        // Two stacked boxes on the ray, the nearer one added last
        let mut primitives = boxes(1);
        let near = Vec3::new(0.0, 0.0, -2.0);
        primitives.push(PrimitiveRef {
            instance: 1,
            element: 0,
            bbox: Aabb::from_points(near - 0.5, near + 0.5),
        });
        primitives.extend(boxes(8).into_iter().skip(1));

        let bvh = BvhNode::new(primitives);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let hit = bvh.intersect(&ray, ray.range(), &hit_box);
        assert_eq!(hit.instance, 1);
        assert!((hit.distance - 1.5).abs() < 1e-5);
    }
}
