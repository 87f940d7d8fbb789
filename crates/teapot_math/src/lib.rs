//! Double precision vector and matrix types for the teapot tracer.
//!
//! The tracer works in `f64` throughout, so the glam `D*` types are
//! re-exported under the short names used by the rest of the workspace.

pub use glam::{DMat4 as Mat4, DVec3 as Vec3, DVec4 as Vec4};

mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::{frustum, look_at, model_matrix, Mat4Ext};
