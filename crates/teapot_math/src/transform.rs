// Matrix builders for the mesh transform stage.
//
// Points go through glam's `project_point3` (w = 1, divide by w). Normals use
// `Mat4Ext::transform_direction` (w = 0, no divide).

use crate::{Mat4, Vec3};

/// Extension trait for Mat4 used by the transform stage.
pub trait Mat4Ext {
    /// Transform a direction through the full matrix with an implicit w = 0.
    ///
    /// Unlike glam's `transform_vector3`, the bottom row is not assumed to be
    /// affine, so this is exact for any matrix.
    fn transform_direction(&self, direction: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_direction(&self, direction: Vec3) -> Vec3 {
        (*self * direction.extend(0.0)).truncate()
    }
}

/// Build a model matrix as `Rx · Ry · Rz · S · T`.
///
/// `rotation` holds Euler angles in radians. The product is composed in that
/// left-to-right order, so a point is translated first, then scaled, then
/// rotated about Z, Y and X.
pub fn model_matrix(rotation: Vec3, scale: Vec3, translation: Vec3) -> Mat4 {
    Mat4::from_rotation_x(rotation.x)
        * Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_z(rotation.z)
        * Mat4::from_scale(scale)
        * Mat4::from_translation(translation)
}

/// Right-handed view matrix looking from `from` toward `to` with +Y up.
///
/// The camera basis is `n = normalize(from - to)`, `u = normalize(Y × n)`,
/// `v = n × u`; the camera looks down its local -Z axis.
pub fn look_at(from: Vec3, to: Vec3) -> Mat4 {
    Mat4::look_at_rh(from, to, Vec3::Y)
}

/// Off-axis perspective frustum (OpenGL clip conventions, depth in [-1, 1]).
///
/// Equivalent to `glFrustum(left, right, bottom, top, near, far)`. Used for
/// stereo pairs where each eye's window is shifted horizontally.
pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    Mat4::from_cols_array_2d(&[
        [2.0 * near / width, 0.0, 0.0, 0.0],
        [0.0, 2.0 * near / height, 0.0, 0.0],
        [
            (right + left) / width,
            (top + bottom) / height,
            -(far + near) / depth,
            -1.0,
        ],
        [0.0, 0.0, -2.0 * far * near / depth, 0.0],
    ])
}
