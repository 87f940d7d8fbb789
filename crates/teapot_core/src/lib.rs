//! Teapot Core - triangle scene representation and mesh loading.
//!
//! This crate provides:
//!
//! - **Geometry types**: `Triangle`, `Mesh` (object space) and `Scene`
//!   (camera space, validated, ready to trace)
//! - **JSON loading**: the `{"data": [{"v0": {"v": .., "n": ..}, ..}]}` mesh format
//! - **Transform stage**: model/view/projection setup and stereo eye offsets
//!
//! # Example
//!
//! ```ignore
//! use teapot_core::{load_mesh, EyeView, ViewSetup};
//!
//! let mesh = load_mesh("data/teapot.json")?;
//! let setup = ViewSetup::for_eye(&EyeView::default(), Vec3::ZERO);
//! let scene = setup.apply(&mesh)?;
//! println!("{} triangles ready", scene.triangle_count());
//! ```

pub mod loader;
pub mod mesh;
pub mod scene;
pub mod view;

// Re-export commonly used types
pub use loader::{load_mesh, load_mesh_from_str, LoadError, LoadResult};
pub use mesh::{Mesh, Triangle};
pub use scene::{Scene, SceneError};
pub use view::{stereo_offset, EyeView, StereoRig, ViewSetup};
