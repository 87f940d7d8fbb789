use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Primary rays are built with a unit-length direction, so the ray
/// parameter `t` is a distance along the ray. Nothing here enforces that.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point at `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_direction_gives_distance() {
        let eye = Vec3::new(0.04, 0.25, 2.5);
        let ray = Ray::new(eye, Vec3::new(0.0, 0.6, -0.8));

        let p = ray.at(5.0);
        assert!((p.distance(eye) - 5.0).abs() < 1e-12);
        assert!((p - Vec3::new(0.04, 3.25, -1.5)).length() < 1e-12);
    }

    #[test]
    fn test_negative_t_is_behind_origin() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(ray.at(0.0), ray.origin());
        assert_eq!(ray.at(-2.0), Vec3::new(0.0, 0.0, 2.0));
    }
}
