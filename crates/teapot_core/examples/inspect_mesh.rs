//! Example: Load a JSON mesh and report what the tracer would see.
//!
//! Run with: cargo run --example inspect_mesh -- data/teapot.json

use std::env;

use teapot_core::{load_mesh, StereoRig, ViewSetup};
use teapot_math::Vec3;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_mesh <path-to-mesh-json>");
        return;
    }

    let path = &args[1];
    println!("Loading mesh file: {}", path);

    let mesh = match load_mesh(path) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("Error loading mesh file: {}", e);
            return;
        }
    };

    println!("\n=== Mesh: {} ===", mesh.name);
    println!("Triangles: {}", mesh.triangle_count());

    let rig = StereoRig::default();
    println!("\n--- Stereo ---");
    println!("  Window offset: {:.6}", rig.offset());

    for (label, eye) in [("left", rig.left_eye()), ("right", rig.right_eye())] {
        let setup = ViewSetup::for_eye(&eye, Vec3::ZERO);
        match setup.apply(&mesh) {
            Ok(scene) => {
                let mut min = Vec3::splat(f64::INFINITY);
                let mut max = Vec3::splat(f64::NEG_INFINITY);
                for tri in scene.triangles() {
                    for v in tri.vertices() {
                        min = min.min(v);
                        max = max.max(v);
                    }
                }
                println!(
                    "  [{}] window ({:.3}, {:.3}), NDC bounds ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
                    label, eye.left, eye.right, min.x, min.y, min.z, max.x, max.y, max.z
                );
            }
            Err(e) => eprintln!("  [{}] invalid scene: {}", label, e),
        }
    }
}
