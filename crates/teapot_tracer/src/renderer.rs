//! Frame driver.
//!
//! Every call renders the full frame from scratch: one primary ray per
//! pixel, nearest hit, shade or background.

use std::path::Path;
use std::time::Instant;

use serde::Deserialize;
use teapot_math::Ray;
use thiserror::Error;

use crate::{shade, Camera, Color, Light, Material, NearestHit};

/// Background color for rays that hit nothing.
pub const DEFAULT_BACKGROUND: Color = Color::new(0.2, 0.2, 0.2);

/// Errors from rendering or writing a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Scene has no triangles to render")]
    EmptyScene,

    #[error("Pixel buffer does not fit a {width}x{height} image")]
    BufferSize { width: u32, height: u32 },

    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// The single point light
    pub light: Light,
    /// Shading coefficients applied to every triangle
    pub material: Material,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            light: Light::default(),
            material: Material::default(),
        }
    }
}

/// Compute the color seen by a ray.
///
/// The ray origin doubles as the eye position for the specular term.
pub fn ray_color(ray: &Ray, world: &dyn NearestHit, config: &RenderConfig) -> Color {
    match world.nearest_hit(ray) {
        Some(hit) => shade(
            hit.p,
            &config.light,
            ray.origin(),
            hit.normal,
            &config.material,
        ),
        None => config.background,
    }
}

/// Render a single pixel.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn NearestHit,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let ray = camera.get_ray(x, y);
    ray_color(&ray, world, config)
}

/// Convert a color to 8-bit RGBA.
///
/// Channels are clamped to [0, 1], scaled to [0, 255] and rounded. No gamma
/// correction is applied.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = (color.clamp(Color::ZERO, Color::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// Number of pixels in a `width` x `height` image, computed without `u32` overflow.
pub fn pixel_len(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Row-major buffer of linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; pixel_len(width, height)],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Encode the buffer to a file; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let image = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba()).ok_or(
            RenderError::BufferSize {
                width: self.width,
                height: self.height,
            },
        )?;
        image.save(path.as_ref())?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }
}

/// Reject images with no pixels and worlds with no triangles.
pub(crate) fn check_frame(camera: &Camera, world: &dyn NearestHit) -> Result<(), RenderError> {
    if camera.image_width == 0 || camera.image_height == 0 {
        return Err(RenderError::EmptyImage {
            width: camera.image_width,
            height: camera.image_height,
        });
    }
    if world.is_empty() {
        return Err(RenderError::EmptyScene);
    }
    Ok(())
}

/// Render the entire scene to an image buffer on the calling thread.
pub fn render(
    camera: &Camera,
    world: &dyn NearestHit,
    config: &RenderConfig,
) -> Result<ImageBuffer, RenderError> {
    check_frame(camera, world)?;

    log::info!(
        "Rendering {} triangles at {}x{} (fov {}°, eye {})",
        world.triangle_count(),
        camera.image_width,
        camera.image_height,
        camera.vfov(),
        camera.eye()
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, world, x, y, config);
            image.set(x, y, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}
