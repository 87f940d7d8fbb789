//! Teapot Tracer - CPU ray tracing of triangle scenes.
//!
//! One primary ray per pixel from a pinhole camera, an exhaustive
//! Möller-Trumbore test against every triangle, nearest-hit selection,
//! barycentric normal interpolation and Blinn-Phong style local shading.
//! No shadows, reflections or anti-aliasing.

mod bucket;
mod camera;
mod hittable;
mod material;
mod renderer;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{generate_ray, Camera, DEFAULT_VFOV};
pub use hittable::{nearest_hit, HitRecord, NearestHit};
pub use material::{shade, Color, Light, Material};
pub use renderer::{
    color_to_rgba, pixel_len, ray_color, render, render_pixel, ImageBuffer, RenderConfig, RenderError,
    DEFAULT_BACKGROUND,
};
pub use triangle::{area, barycentric, intersect, Intersection, MIN_HIT_DISTANCE, PARALLEL_EPSILON};

/// Re-export common types from the sibling crates
pub use teapot_core::{Scene, Triangle};
pub use teapot_math::{Ray, Vec3};
