use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use teapot_math::Vec3;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "teapot")]
#[command(about = "Ray trace a JSON triangle mesh with Phong shading")]
pub struct Args {
    /// Mesh file ({"data": [{"v0": {"v": [..], "n": [..]}, ..}]})
    pub mesh: PathBuf,

    /// Output image path; the extension picks the format
    #[arg(short, long, default_value = "teapot.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 256)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 256)]
    pub height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = teapot_tracer::DEFAULT_VFOV)]
    pub fov: f64,

    /// Eye position in camera space
    #[arg(long, value_delimiter = ',', default_values_t = [0.04, 0.25, 2.5], allow_hyphen_values = true)]
    pub eye: Vec<f64>,

    /// JSON file with "background", "light" and "material" overrides
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Ambient coefficient
    #[arg(long)]
    pub ka: Option<f64>,

    /// Diffuse coefficient
    #[arg(long)]
    pub kd: Option<f64>,

    /// Specular coefficient
    #[arg(long)]
    pub ks: Option<f64>,

    /// Specular exponent
    #[arg(long)]
    pub shininess: Option<f64>,

    /// Mesh rotation about X in radians
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rx: f64,

    /// Mesh rotation about Y in radians
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub ry: f64,

    /// Mesh rotation about Z in radians
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rz: f64,

    /// Render a left/right stereo pair instead of a single centered view
    #[arg(long)]
    pub stereo: bool,

    /// Render buckets on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Bucket size for --parallel
    #[arg(long, default_value_t = teapot_tracer::DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// The `--eye` components as a vector.
    pub fn eye_position(&self) -> Result<Vec3> {
        ensure!(
            self.eye.len() == 3,
            "--eye takes exactly three comma separated values, got {}",
            self.eye.len()
        );
        Ok(Vec3::new(self.eye[0], self.eye[1], self.eye[2]))
    }

    /// Mesh rotation as Euler angles in radians.
    pub fn rotation(&self) -> Vec3 {
        Vec3::new(self.rx, self.ry, self.rz)
    }
}
