//! Bucket-based parallel rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! with rayon. Each pixel is computed exactly as in [`render`](crate::render),
//! so the result is identical to the single-threaded frame.

use std::time::Instant;

use rayon::prelude::*;

use crate::renderer::{check_frame, pixel_len, render_pixel};
use crate::{Camera, Color, ImageBuffer, NearestHit, RenderConfig, RenderError};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> usize {
        pixel_len(self.width, self.height)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Center buckets come first, so the middle of the frame (where the mesh
/// usually sits) is scheduled before the borders.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn NearestHit,
    config: &RenderConfig,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count());

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, global_x, global_y, config));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into their place in `image`.
    pub fn write_into(&self, image: &mut ImageBuffer) {
        let mut colors = self.pixels.iter();
        for local_y in 0..self.bucket.height {
            for local_x in 0..self.bucket.width {
                if let Some(color) = colors.next() {
                    image.set(self.bucket.x + local_x, self.bucket.y + local_y, *color);
                }
            }
        }
    }
}

/// Render the entire scene with buckets spread over the rayon thread pool.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn NearestHit,
    config: &RenderConfig,
    bucket_size: u32,
) -> Result<ImageBuffer, RenderError> {
    check_frame(camera, world)?;

    let buckets = generate_buckets(camera.image_width, camera.image_height, bucket_size);
    log::info!(
        "Rendering {}x{} in {} buckets on {} threads",
        camera.image_width,
        camera.image_height,
        buckets.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, camera, world, config)))
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for result in &results {
        result.write_into(&mut image);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, Light};
    use teapot_core::{Scene, Triangle};
    use teapot_math::Vec3;

    #[test]
    fn test_buckets_cover_every_pixel_once() {
        let (width, height) = (100, 70);
        let mut covered = vec![0u8; (width * height) as usize];

        for bucket in generate_buckets(width, height, 32) {
            for y in bucket.y..bucket.y + bucket.height {
                for x in bucket.x..bucket.x + bucket.width {
                    covered[(y * width + x) as usize] += 1;
                }
            }
        }

        assert!(covered.iter().all(|&n| n == 1));
    }

    #[test]
    fn test_zero_bucket_size_falls_back_to_pixels() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
        assert!(buckets.iter().all(|b| b.pixel_count() == 1));
    }

    #[test]
    fn test_center_bucket_first() {
        // 3x3 grid of 64px buckets
        let buckets = generate_buckets(192, 192, 64);

        assert_eq!((buckets[0].x, buckets[0].y), (64, 64));
        let indices: Vec<usize> = buckets.iter().map(|b| b.index).collect();
        assert_eq!(indices, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_large_bucket_pixel_count() {
        let bucket = Bucket::new(0, 0, 70_000, 70_000, 0);
        assert_eq!(bucket.pixel_count(), 4_900_000_000);
    }

    #[test]
    fn test_parallel_rejects_empty_world() {
        let camera = Camera::new().with_resolution(8, 8);
        let err = render_parallel(&camera, &Vec::<Triangle>::new(), &RenderConfig::default(), 4)
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptyScene));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let scene = Scene::new(vec![
            Triangle::new(
                [
                    Vec3::new(-1.0, -1.0, -4.0),
                    Vec3::new(1.5, -1.0, -5.0),
                    Vec3::new(0.0, 1.2, -6.0),
                ],
                [Vec3::Z, Vec3::new(0.3, 0.0, 1.0).normalize(), Vec3::Y],
            ),
            Triangle::with_normal(
                Vec3::new(-2.0, -2.0, -7.0),
                Vec3::new(2.0, -2.0, -7.0),
                Vec3::new(0.0, 2.0, -7.0),
                Vec3::Z,
            ),
        ])
        .unwrap();

        let camera = Camera::new().with_resolution(37, 23);
        let config = RenderConfig {
            light: Light {
                position: Vec3::new(2.0, 3.0, 0.0),
                ..Light::default()
            },
            ..RenderConfig::default()
        };

        let serial = render(&camera, &scene, &config).unwrap();
        let parallel = render_parallel(&camera, &scene, &config, 8).unwrap();
        assert_eq!(serial, parallel);
    }
}
