//! Axis-aligned bounds and rays used for picking and debug drawing

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from a list of points
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };

        rest.iter().fold(Self::new(*first, *first), |aabb, point| {
            Self::new(aabb.min.min(*point), aabb.max.max(*point))
        })
    }

    /// Flat box spanning a 2D rectangle at z = 0
    pub fn from_rect(position: Vec2, size: Vec2) -> Self {
        let a = position.extend(0.0);
        let b = (position + size).extend(0.0);
        Self::new(a.min(b), a.max(b))
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size/extents of the AABB
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the box diagonal
    pub fn diagonal(&self) -> f32 {
        self.size().length()
    }

    /// The 8 corners, bottom face first
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ]
    }

    /// Transform the AABB by a matrix, returning the box enclosing the transformed corners
    pub fn transform(&self, transform: Mat4) -> Self {
        let corners = self.corners().map(|corner| transform.transform_point3(corner));
        Self::from_points(&corners)
    }

    /// Whether a point lies inside or on the boundary
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// A half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalised direction
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against an AABB.
    ///
    /// Returns the distance to the entry point, or 0 when the origin is inside
    /// the box. `None` when the ray misses or the box lies behind the origin.
    pub fn hit_distance(&self, aabb: &Aabb) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];
            let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

            if direction.abs() < f32::EPSILON {
                // Parallel to the slab: must already be between the planes
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let t1 = (lo - origin) * inv;
            let t2 = (hi - origin) * inv;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));

            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let aabb = Aabb::from_points(&[
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0),
        ]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 5.0));
        assert_eq!(Aabb::from_points(&[]), Aabb::default());
    }

    #[test]
    fn test_from_rect_with_negative_size() {
        let aabb = Aabb::from_rect(Vec2::new(2.0, 2.0), Vec2::new(-1.0, 3.0));
        assert_eq!(aabb.min, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 5.0, 0.0));
    }

    #[test]
    fn test_transform_translation_and_scale() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let moved = aabb.transform(
            Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)) * Mat4::from_scale(Vec3::splat(2.0)),
        );
        assert_eq!(moved.min, Vec3::new(8.0, -2.0, -2.0));
        assert_eq!(moved.max, Vec3::new(12.0, 2.0, 2.0));
        assert_eq!(moved.center(), Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_hits_box_in_front() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -6.0), Vec3::new(1.0, 1.0, -4.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = ray.hit_distance(&aabb).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!(ray.at(t).abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), 1e-5));
    }

    #[test]
    fn test_ray_misses_box_behind() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, 4.0), Vec3::new(1.0, 1.0, 6.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(ray.hit_distance(&aabb).is_none());
    }

    #[test]
    fn test_ray_inside_box() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.hit_distance(&aabb), Some(0.0));
    }

    #[test]
    fn test_axis_parallel_ray_hits_flat_box() {
        // Sprite boxes have zero depth
        let aabb = Aabb::from_rect(Vec2::ZERO, Vec2::ONE);
        let ray = Ray::new(Vec3::new(0.5, 0.5, 10.0), Vec3::NEG_Z);
        let t = ray.hit_distance(&aabb).unwrap();
        assert!((t - 10.0).abs() < 1e-5);

        let parallel_miss = Ray::new(Vec3::new(0.5, 2.0, 10.0), Vec3::NEG_Z);
        assert!(parallel_miss.hit_distance(&aabb).is_none());
    }
}
