//! Nearest-hit selection.
//!
//! The frame driver only talks to [`NearestHit`], so a spatial index can be
//! dropped in later without touching the intersector or the shader. The
//! implementations here are exhaustive: every triangle is tested for every ray.

use teapot_core::{Scene, Triangle};
use teapot_math::{Ray, Vec3};

use crate::triangle::intersect;

/// The closest hit along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Index of the triangle that was hit
    pub triangle: usize,
    /// Ray parameter of the hit
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Barycentric weights (α, β, γ)
    pub barycentric: Vec3,
    /// Vertex normals blended by `barycentric` (not re-normalized)
    pub normal: Vec3,
}

/// Anything that can answer "what does this ray hit first".
pub trait NearestHit: Send + Sync {
    /// Find the hit with the smallest valid `t`, if any.
    fn nearest_hit(&self, ray: &Ray) -> Option<HitRecord>;

    /// Number of triangles a ray is tested against.
    fn triangle_count(&self) -> usize;

    /// True when there is nothing to hit.
    fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }
}

/// Test `ray` against every triangle and keep the closest hit.
///
/// Only a strictly smaller `t` replaces the current best, so on ties the
/// triangle that comes first wins.
pub fn nearest_hit(triangles: &[Triangle], ray: &Ray) -> Option<HitRecord> {
    let mut closest_so_far = f64::INFINITY;
    let mut closest = None;

    for (index, triangle) in triangles.iter().enumerate() {
        if let Some(hit) = intersect(ray, triangle) {
            if hit.t < closest_so_far {
                closest_so_far = hit.t;
                closest = Some((index, triangle, hit));
            }
        }
    }

    closest.map(|(index, triangle, hit)| HitRecord {
        triangle: index,
        t: hit.t,
        p: hit.point,
        barycentric: hit.barycentric,
        normal: triangle.interpolate_normal(hit.barycentric),
    })
}

impl NearestHit for [Triangle] {
    fn nearest_hit(&self, ray: &Ray) -> Option<HitRecord> {
        nearest_hit(self, ray)
    }

    fn triangle_count(&self) -> usize {
        self.len()
    }
}

impl NearestHit for Vec<Triangle> {
    fn nearest_hit(&self, ray: &Ray) -> Option<HitRecord> {
        nearest_hit(self, ray)
    }

    fn triangle_count(&self) -> usize {
        self.len()
    }
}

impl NearestHit for Scene {
    fn nearest_hit(&self, ray: &Ray) -> Option<HitRecord> {
        nearest_hit(self.triangles(), ray)
    }

    fn triangle_count(&self) -> usize {
        Scene::triangle_count(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_at(z: f64, normal: Vec3) -> Triangle {
        Triangle::with_normal(
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
            normal,
        )
    }

    #[test]
    fn test_nearest_of_two_overlapping() {
        let far = triangle_at(-8.0, Vec3::X);
        let near = triangle_at(-5.0, Vec3::Y);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // Order in the list must not matter
        for triangles in [vec![far, near], vec![near, far]] {
            let hit = triangles.nearest_hit(&ray).unwrap();
            assert!((hit.t - 5.0).abs() < 1e-9);
            assert!((hit.normal - Vec3::Y).length() < 1e-4);
        }
    }

    #[test]
    fn test_equal_t_keeps_first() {
        let first = triangle_at(-5.0, Vec3::X);
        let second = triangle_at(-5.0, Vec3::Y);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = nearest_hit(&[first, second], &ray).unwrap();
        assert_eq!(hit.triangle, 0);
    }

    #[test]
    fn test_no_hit() {
        let triangles = vec![triangle_at(-5.0, Vec3::Z)];
        let ray = Ray::new(Vec3::new(10.0, 10.0, 0.0), Vec3::NEG_Z);
        assert!(triangles.nearest_hit(&ray).is_none());
    }

    #[test]
    fn test_ignores_triangles_behind() {
        let behind = triangle_at(5.0, Vec3::X);
        let ahead = triangle_at(-7.0, Vec3::Y);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = nearest_hit(&[behind, ahead], &ray).unwrap();
        assert_eq!(hit.triangle, 1);
        assert!((hit.p.z + 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangle_counts() {
        let triangles = vec![triangle_at(-5.0, Vec3::Z), triangle_at(-6.0, Vec3::Z)];
        assert_eq!(NearestHit::triangle_count(&triangles), 2);
        assert_eq!(NearestHit::triangle_count(triangles.as_slice()), 2);
        assert!(!NearestHit::is_empty(&triangles));
        assert!(NearestHit::is_empty(&Vec::<Triangle>::new()));

        let scene = Scene::new(triangles).unwrap();
        assert_eq!(NearestHit::triangle_count(&scene), 2);
    }

    #[test]
    fn test_scene_lookup() {
        let scene = Scene::new(vec![triangle_at(-5.0, Vec3::Z)]).unwrap();
        let hit = scene.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();
        assert_eq!(hit.triangle, 0);
    }
}
