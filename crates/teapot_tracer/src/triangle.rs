//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm to find the hit distance, then
//! recomputes the barycentric weights of the hit point from sub-triangle
//! areas.

use teapot_core::Triangle;
use teapot_math::{Interval, Ray, Vec3};

/// Below this `|det|` the ray is treated as parallel to the triangle plane.
///
/// Deliberately coarse; it decides which grazing rays miss.
pub const PARALLEL_EPSILON: f64 = 1e-4;

/// Hits at or closer than this distance are rejected.
pub const MIN_HIT_DISTANCE: f64 = 1e-12;

/// Triangles with a doubled area below this are degenerate.
const DEGENERATE_AREA: f64 = 1e-12;

/// Valid forward hit distances: (MIN_HIT_DISTANCE, ∞).
const HIT_RANGE: Interval = Interval::new(MIN_HIT_DISTANCE, f64::INFINITY);

/// A ray-triangle hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Ray parameter of the hit
    pub t: f64,
    /// Hit point, `origin + t * direction`
    pub point: Vec3,
    /// Weights (α, β, γ) of v0, v1, v2
    pub barycentric: Vec3,
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns `None` when the ray is parallel to the plane (`|det| < 1e-4`),
/// passes outside the triangle, hits at `t <= 1e-12`, or the triangle is
/// degenerate.
///
/// The barycentric weights in the result come from the area-ratio method
/// ([`barycentric`]), not from the `(1 - u - v, u, v)` of the solve. The two
/// agree to floating tolerance on well-shaped triangles and can drift apart on
/// slivers.
pub fn intersect(ray: &Ray, triangle: &Triangle) -> Option<Intersection> {
    let edge1 = triangle.v1 - triangle.v0;
    let edge2 = triangle.v2 - triangle.v0;

    let pvec = ray.direction().cross(edge2);
    let det = edge1.dot(pvec);

    // Ray is parallel to triangle
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray.origin() - triangle.v0;
    let u = tvec.dot(pvec) * inv_det;

    if !Interval::UNIT.contains(u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray.direction().dot(qvec) * inv_det;

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;

    if !HIT_RANGE.surrounds(t) {
        return None;
    }

    let point = ray.at(t);
    let weights = barycentric(triangle.v0, triangle.v1, triangle.v2, point)?;

    Some(Intersection {
        t,
        point,
        barycentric: weights,
    })
}

/// Doubled area of triangle `abc`: `|(b - a) × (c - a)|`.
pub fn area(a: Vec3, b: Vec3, c: Vec3) -> f64 {
    (b - a).cross(c - a).length()
}

/// Barycentric weights (α, β, γ) of `p` from sub-triangle area ratios.
///
/// `p` is assumed to lie in the triangle's plane. Returns `None` for a
/// degenerate triangle instead of dividing by (nearly) zero.
pub fn barycentric(v0: Vec3, v1: Vec3, v2: Vec3, p: Vec3) -> Option<Vec3> {
    let whole = area(v0, v1, v2);
    if whole < DEGENERATE_AREA {
        return None;
    }

    Some(Vec3::new(
        area(p, v1, v2) / whole,
        area(v0, p, v2) / whole,
        area(v0, v1, p) / whole,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-4;

    /// Triangle in the z = -5 plane facing +Z.
    fn test_triangle() -> Triangle {
        Triangle::with_normal(
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
            Vec3::Z,
        )
    }

    fn assert_valid_weights(w: Vec3) {
        assert!((w.x + w.y + w.z - 1.0).abs() < TOLERANCE, "weights {:?}", w);
        for c in w.to_array() {
            assert!(c > -TOLERANCE && c < 1.0 + TOLERANCE, "weights {:?}", w);
        }
    }

    #[test]
    fn test_centroid_hit() {
        let tri = test_triangle();
        let centroid = tri.centroid();

        // Straight down the normal through the centroid
        let ray = Ray::new(centroid + Vec3::Z * 5.0, Vec3::NEG_Z);
        let hit = intersect(&ray, &tri).expect("centroid ray should hit");

        assert!((hit.t - 5.0).abs() < 1e-9);
        assert!((hit.point - centroid).length() < 1e-9);
        for c in hit.barycentric.to_array() {
            assert!((c - 1.0 / 3.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_hit_from_origin() {
        let tri = test_triangle();
        let direction = Vec3::new(0.2, -0.3, -5.0).normalize();
        let hit = intersect(&Ray::new(Vec3::ZERO, direction), &tri).unwrap();

        assert!((hit.point.z + 5.0).abs() < 1e-9);
        assert_valid_weights(hit.barycentric);
    }

    #[test]
    fn test_weights_match_algebraic_solve() {
        let tri = test_triangle();
        let target = tri.v0 * 0.2 + tri.v1 * 0.5 + tri.v2 * 0.3;
        let ray = Ray::new(Vec3::ZERO, target.normalize());

        let hit = intersect(&ray, &tri).unwrap();
        assert!((hit.barycentric - Vec3::new(0.2, 0.5, 0.3)).length() < TOLERANCE);
    }

    #[test]
    fn test_miss_outside_u() {
        let tri = test_triangle();
        // Far to the right of v1
        let ray = Ray::new(Vec3::new(3.0, -0.9, 0.0), Vec3::NEG_Z);
        assert!(intersect(&ray, &tri).is_none());
    }

    #[test]
    fn test_miss_outside_v() {
        let tri = test_triangle();
        // Below the v0-v1 edge
        let ray = Ray::new(Vec3::new(0.0, -1.5, 0.0), Vec3::NEG_Z);
        assert!(intersect(&ray, &tri).is_none());
    }

    #[test]
    fn test_miss_outside_u_plus_v() {
        let tri = test_triangle();
        // Above the v1-v2 edge, inside the bounding box
        let ray = Ray::new(Vec3::new(0.8, 0.8, 0.0), Vec3::NEG_Z);
        assert!(intersect(&ray, &tri).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = test_triangle();

        // In the plane, off the plane, and through the triangle's interior edge-on
        for origin in [
            Vec3::new(-3.0, 0.0, -5.0),
            Vec3::new(-3.0, 0.0, -4.0),
            Vec3::new(0.0, -3.0, -5.0),
        ] {
            for direction in [Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0).normalize()] {
                assert!(intersect(&Ray::new(origin, direction), &tri).is_none());
            }
        }
    }

    #[test]
    fn test_behind_origin_misses() {
        let tri = test_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(intersect(&ray, &tri).is_none());
    }

    #[test]
    fn test_back_face_hits() {
        let tri = test_triangle();
        // Coming from behind the triangle
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let hit = intersect(&ray, &tri).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_triangle_misses() {
        let collinear = Triangle::with_normal(
            Vec3::new(-1.0, 0.0, -5.0),
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(1.0, 0.0, -5.0),
            Vec3::Z,
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(intersect(&ray, &collinear).is_none());

        assert!(barycentric(collinear.v0, collinear.v1, collinear.v2, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_area() {
        // Right triangle with legs 2 and 3: doubled area is 6
        let a = area(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0));
        assert!((a - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_barycentric_at_vertices() {
        let tri = test_triangle();

        let w0 = barycentric(tri.v0, tri.v1, tri.v2, tri.v0).unwrap();
        let w2 = barycentric(tri.v0, tri.v1, tri.v2, tri.v2).unwrap();

        assert!((w0 - Vec3::X).length() < 1e-12);
        assert!((w2 - Vec3::Z).length() < 1e-12);
    }
}
