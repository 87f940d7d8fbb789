//! Transform stage: object-space meshes to camera-space scenes.
//!
//! Positions go through model, view and an off-axis perspective projection,
//! followed by the perspective divide. Normals go through model and view only
//! and keep whatever length that leaves them with.

use teapot_math::{frustum, look_at, model_matrix, Mat4, Mat4Ext, Vec3};

use crate::mesh::{Mesh, Triangle};
use crate::scene::{Scene, SceneError};

/// Near clip distance of the projection.
pub const NEAR: f64 = 3.0;
/// Far clip distance of the projection.
pub const FAR: f64 = 20.0;
/// Bottom edge of the projection window on the near plane.
pub const BOTTOM: f64 = -1.0;
/// Top edge of the projection window on the near plane.
pub const TOP: f64 = 1.0;

/// Where one eye sits and which slice of the near plane it sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeView {
    pub from: Vec3,
    pub to: Vec3,
    /// Left edge of the near-plane window
    pub left: f64,
    /// Right edge of the near-plane window
    pub right: f64,
}

impl Default for EyeView {
    /// A single centered eye between the two stereo positions.
    fn default() -> Self {
        Self {
            from: Vec3::new(0.0, 4.0, 15.0),
            to: Vec3::ZERO,
            left: -1.0,
            right: 1.0,
        }
    }
}

/// Model, view and projection matrices for one eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSetup {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Default for ViewSetup {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }
}

impl ViewSetup {
    /// Create a setup from explicit matrices.
    pub fn new(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model,
            view,
            projection,
        }
    }

    /// Build the setup for an eye with the mesh rotated by `rotation`
    /// (Euler angles in radians, unit scale, no translation).
    pub fn for_eye(eye: &EyeView, rotation: Vec3) -> Self {
        Self::new(
            model_matrix(rotation, Vec3::ONE, Vec3::ZERO),
            look_at(eye.from, eye.to),
            frustum(eye.left, eye.right, BOTTOM, TOP, NEAR, FAR),
        )
    }

    /// Transform a single triangle into camera space.
    pub fn transform_triangle(&self, triangle: &Triangle) -> Triangle {
        let model_view = self.view * self.model;
        let clip = self.projection * model_view;

        triangle.map(
            |p| clip.project_point3(p),
            |n| model_view.transform_direction(n),
        )
    }

    /// Transform every triangle of `mesh` and build a scene from the result.
    pub fn apply(&self, mesh: &Mesh) -> Result<Scene, SceneError> {
        let triangles = mesh
            .triangles
            .iter()
            .map(|t| self.transform_triangle(t))
            .collect();

        log::debug!(
            "Transformed {} triangles of mesh '{}'",
            mesh.triangle_count(),
            mesh.name
        );
        Scene::new(triangles)
    }
}

/// Horizontal window shift for a symmetric stereo pair.
///
/// `left`/`right` are the base window edges, `from`/`to` one eye's position
/// and target. With `h = |left - right| / 2` and `d = |from - to|` the result
/// is `| cos(asin(h / d)) - |left| |`.
pub fn stereo_offset(left: f64, right: f64, from: Vec3, to: Vec3) -> f64 {
    let half_baseline = (left - right).abs() / 2.0;
    let distance = from.distance(to);
    let adjusted = (half_baseline / distance).asin().cos();
    (adjusted - left.abs()).abs()
}

/// Two eyes mirrored about x = 0, both looking at the same target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoRig {
    pub left_from: Vec3,
    pub right_from: Vec3,
    pub target: Vec3,
    /// Base window edges before the per-eye shift
    pub left: f64,
    pub right: f64,
}

impl Default for StereoRig {
    fn default() -> Self {
        Self {
            left_from: Vec3::new(-1.0, 4.0, 15.0),
            right_from: Vec3::new(1.0, 4.0, 15.0),
            target: Vec3::ZERO,
            left: -1.0,
            right: 1.0,
        }
    }
}

impl StereoRig {
    /// Window shift, computed from the left eye and applied to both.
    pub fn offset(&self) -> f64 {
        stereo_offset(self.left, self.right, self.left_from, self.target)
    }

    /// Left eye: window shifted by `+offset`.
    pub fn left_eye(&self) -> EyeView {
        let offset = self.offset();
        EyeView {
            from: self.left_from,
            to: self.target,
            left: self.left + offset,
            right: self.right + offset,
        }
    }

    /// Right eye: window shifted by `-offset`.
    pub fn right_eye(&self) -> EyeView {
        let offset = self.offset();
        EyeView {
            from: self.right_from,
            to: self.target,
            left: self.left - offset,
            right: self.right - offset,
        }
    }
}
