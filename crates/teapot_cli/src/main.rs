use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use teapot_core::{load_mesh, EyeView, Mesh, StereoRig, ViewSetup};
use teapot_tracer::{render, render_parallel, Camera, ImageBuffer, RenderConfig};

mod cli;

use cli::Args;

/// Start from the settings file (if any), then apply per-coefficient flags.
fn load_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.settings {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open settings file {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Invalid settings file {}", path.display()))?
        }
        None => RenderConfig::default(),
    };

    let material = &mut config.material;
    if let Some(ka) = args.ka {
        material.ka = ka;
    }
    if let Some(kd) = args.kd {
        material.kd = kd;
    }
    if let Some(ks) = args.ks {
        material.ks = ks;
    }
    if let Some(shininess) = args.shininess {
        material.shininess = shininess;
    }

    Ok(config)
}

/// `out.png` → `out_left.png` for a stereo eye, unchanged for a mono view.
fn output_path(base: &Path, label: Option<&str>) -> PathBuf {
    let Some(label) = label else {
        return base.to_path_buf();
    };

    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("teapot");
    let mut name = format!("{}_{}", stem, label);
    if let Some(ext) = base.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    base.with_file_name(name)
}

fn render_eye(
    args: &Args,
    mesh: &Mesh,
    eye: &EyeView,
    camera: &Camera,
    config: &RenderConfig,
) -> Result<ImageBuffer> {
    let scene = ViewSetup::for_eye(eye, args.rotation())
        .apply(mesh)
        .context("Transformed mesh is not a valid scene")?;

    let image = if args.parallel {
        render_parallel(camera, &scene, config, args.bucket_size)?
    } else {
        render(camera, &scene, config)?
    };
    Ok(image)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting teapot");

    let mesh = load_mesh(&args.mesh)
        .with_context(|| format!("Failed to load mesh {}", args.mesh.display()))?;
    let config = load_config(&args)?;
    log::debug!("Render config: {:?}", config);

    let camera = Camera::new()
        .with_resolution(args.width, args.height)
        .with_fov(args.fov)
        .with_eye(args.eye_position()?);

    let eyes: Vec<(Option<&str>, EyeView)> = if args.stereo {
        let rig = StereoRig::default();
        log::info!("Stereo window offset {:.6}", rig.offset());
        vec![(Some("left"), rig.left_eye()), (Some("right"), rig.right_eye())]
    } else {
        vec![(None, EyeView::default())]
    };

    let start = Instant::now();
    for (label, eye) in &eyes {
        let image = render_eye(&args, &mesh, eye, &camera, &config)?;
        let path = output_path(&args.output, *label);
        image
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    log::info!(
        "Finished {} view(s) of {} triangles in {:?}",
        eyes.len(),
        mesh.triangle_count(),
        start.elapsed()
    );
    Ok(())
}
