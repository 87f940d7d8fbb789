//! Local illumination.
//!
//! One point light, ambient + diffuse + specular, no shadows.

use serde::Deserialize;
use teapot_math::{Interval, Vec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Phong coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Ambient coefficient
    pub ka: f64,
    /// Diffuse coefficient
    pub kd: f64,
    /// Specular coefficient
    pub ks: f64,
    /// Specular exponent
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: 0.5,
            kd: 0.5,
            ks: 0.5,
            shininess: 8.0,
        }
    }
}

impl Material {
    /// Create a material from its four coefficients.
    pub fn new(ka: f64, kd: f64, ks: f64, shininess: f64) -> Self {
        Self {
            ka,
            kd,
            ks,
            shininess,
        }
    }
}

/// A point light.
///
/// `emission` drives both the diffuse and the specular term.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Color,
    pub emission: Color,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.0, 0.5, 1.0),
            ambient: Color::new(0.2, 0.2, 0.2),
            emission: Color::new(0.6, 0.3, 0.6),
        }
    }
}

/// Shade `point` with surface `normal` as seen from `eye`.
///
/// ```text
/// L = normalize(light - p)      E = eye - p
/// d = clamp(N·L, 0, 1)          H = normalize(L + E)
/// s = clamp((N·H)^shininess, 0, 1)
/// color = ambient·ka + emission·d·kd + emission·s·ks
/// ```
///
/// `E` is left unnormalized, so the half vector leans toward the eye in
/// proportion to the eye distance. `N` is used as given. A NaN specular
/// term (negative `N·H` with a fractional exponent) counts as zero.
pub fn shade(point: Vec3, light: &Light, eye: Vec3, normal: Vec3, material: &Material) -> Color {
    let to_light = (light.position - point).normalize();
    let to_eye = eye - point;

    let diffuse = Interval::UNIT.clamp(normal.dot(to_light));

    let half = (to_light + to_eye).normalize();
    let specular = normal.dot(half).powf(material.shininess);
    let specular = if specular.is_nan() {
        0.0
    } else {
        Interval::UNIT.clamp(specular)
    };

    light.ambient * material.ka
        + light.emission * (diffuse * material.kd)
        + light.emission * (specular * material.ks)
}
