//! Single triangle example.
//!
//! Renders one triangle facing the camera and saves it in PPM format.

use teapot_tracer::{
    color_to_rgba, render, Camera, ImageBuffer, Light, Material, RenderConfig, Scene, Triangle,
    Vec3,
};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("Teapot Tracer - Single Triangle Example");
    println!("=======================================");

    let scene = Scene::new(vec![Triangle::new(
        [
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
        ],
        [
            Vec3::new(-0.3, -0.3, 1.0).normalize(),
            Vec3::new(0.3, -0.3, 1.0).normalize(),
            Vec3::new(0.0, 0.4, 1.0).normalize(),
        ],
    )])
    .expect("triangle is finite");

    let camera = Camera::new().with_resolution(256, 256);

    let config = RenderConfig {
        light: Light {
            position: Vec3::new(0.0, 4.0, -3.0),
            ..Light::default()
        },
        material: Material::new(0.5, 0.5, 0.5, 8.0),
        ..RenderConfig::default()
    };

    let start = std::time::Instant::now();
    let image = render(&camera, &scene, &config).expect("non-empty image");
    println!("Rendered {}x{} in {:?}", image.width, image.height, start.elapsed());

    let filename = "triangle.ppm";
    save_ppm(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let rgba = color_to_rgba(image.get(x, y));
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    Ok(())
}
