//! The traceable scene.
//!
//! A `Scene` is the ordered, validated triangle list the tracer consumes.
//! Triangle indices are stable for the lifetime of the scene and serve as
//! triangle ids.

use thiserror::Error;

use crate::mesh::Triangle;

/// Reasons a triangle list is refused as a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Scene contains no triangles")]
    Empty,

    #[error("Triangle {index} has a non-finite position or normal")]
    NonFinite { index: usize },
}

/// An ordered sequence of triangles ready for tracing.
///
/// Construction fails fast on an empty list or on NaN/infinite data, so a
/// blank frame always means "nothing was hit" rather than "nothing was loaded".
#[derive(Clone, Debug)]
pub struct Scene {
    triangles: Vec<Triangle>,
}

impl Scene {
    /// Build a scene, validating every triangle.
    pub fn new(triangles: Vec<Triangle>) -> Result<Self, SceneError> {
        if triangles.is_empty() {
            return Err(SceneError::Empty);
        }

        if let Some(index) = triangles.iter().position(|t| !t.is_finite()) {
            return Err(SceneError::NonFinite { index });
        }

        Ok(Self { triangles })
    }

    /// All triangles in id order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Get a triangle by id.
    pub fn get(&self, id: usize) -> Option<&Triangle> {
        self.triangles.get(id)
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}
