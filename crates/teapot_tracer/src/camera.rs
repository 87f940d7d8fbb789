//! Pinhole camera for primary ray generation.
//!
//! The camera sits at `eye` and looks down -Z with +Y up. There is no
//! orientation beyond that: the scene is expected to arrive already in
//! camera space.

use teapot_math::{Ray, Vec3};

/// Default vertical field of view in degrees.
pub const DEFAULT_VFOV: f64 = 60.0;

/// Camera for generating primary rays into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    eye: Vec3,

    // Vertical field of view in degrees
    vfov: f64,
}

impl Camera {
    /// Create a new camera with default settings (256x256, 60° FOV, eye at origin).
    pub fn new() -> Self {
        Self {
            image_width: 256,
            image_height: 256,
            eye: Vec3::ZERO,
            vfov: DEFAULT_VFOV,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the eye position (ray origin).
    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f64) -> Self {
        self.vfov = vfov;
        self
    }

    /// Eye position.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Vertical field of view in degrees.
    pub fn vfov(&self) -> f64 {
        self.vfov
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.image_width as f64 / self.image_height as f64
    }

    /// Generate the primary ray through the center of pixel (i, j).
    ///
    /// Row 0 is the top of the image. The returned direction is unit length.
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let half_height = (self.vfov.to_radians() / 2.0).tan();

        // Pixel center in NDC, y flipped
        let x = 2.0 * ((i as f64 + 0.5) / self.image_width as f64) - 1.0;
        let y = 1.0 - 2.0 * ((j as f64 + 0.5) / self.image_height as f64);

        let direction = Vec3::new(
            x * self.aspect_ratio() * half_height,
            y * half_height,
            -1.0,
        )
        .normalize();

        Ray::new(self.eye, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Primary ray for pixel (x, y) with the default 60° field of view.
pub fn generate_ray(pixel_x: u32, pixel_y: u32, eye: Vec3, image_width: u32, image_height: u32) -> Ray {
    Camera::new()
        .with_resolution(image_width, image_height)
        .with_eye(eye)
        .get_ray(pixel_x, pixel_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_looks_down_negative_z() {
        let eye = Vec3::new(0.04, 0.25, 2.5);
        let ray = generate_ray(1, 1, eye, 3, 3);

        assert_eq!(ray.origin(), eye);
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_builder_settings() {
        let eye = Vec3::new(0.0, -1.0, 3.0);
        let camera = Camera::new().with_resolution(320, 200).with_eye(eye).with_fov(45.0);

        assert_eq!(camera.eye(), eye);
        assert_eq!(camera.vfov(), 45.0);
        assert_eq!(camera.aspect_ratio(), 1.6);
        assert_eq!(camera.get_ray(5, 5).origin(), camera.eye());
    }

    #[test]
    fn test_directions_are_unit_length() {
        let camera = Camera::new().with_resolution(16, 9);
        for (i, j) in [(0, 0), (15, 0), (0, 8), (15, 8), (7, 4)] {
            let d = camera.get_ray(i, j).direction();
            assert!((d.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_row_zero_is_top() {
        let camera = Camera::new().with_resolution(4, 4);

        assert!(camera.get_ray(0, 0).direction().y > 0.0);
        assert!(camera.get_ray(0, 3).direction().y < 0.0);
        assert!(camera.get_ray(0, 0).direction().x < 0.0);
        assert!(camera.get_ray(3, 0).direction().x > 0.0);
    }

    #[test]
    fn test_fov_and_aspect_scaling() {
        // Pixel (1, 0) of a 2x1 image has NDC (0.5, 0)
        let camera = Camera::new().with_resolution(2, 1).with_fov(90.0);
        let d = camera.get_ray(1, 0).direction();

        // tan(45°) = 1, aspect 2 → unnormalized (1, 0, -1)
        let expected = Vec3::new(1.0, 0.0, -1.0).normalize();
        assert!((d - expected).length() < 1e-12);
    }

    #[test]
    fn test_default_fov() {
        // Pixel (0, 0) of 2x2 has NDC (-0.5, 0.5)
        let d = generate_ray(0, 0, Vec3::ZERO, 2, 2).direction();
        let t = (30.0_f64).to_radians().tan();
        let expected = Vec3::new(-0.5 * t, 0.5 * t, -1.0).normalize();
        assert!((d - expected).length() < 1e-12);
    }
}
