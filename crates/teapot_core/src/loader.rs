//! JSON mesh loading.
//!
//! The mesh file is a single object with a `data` array. Each entry holds
//! three vertices `v0`, `v1`, `v2`, and each vertex has a position `v` and a
//! normal `n`:
//!
//! ```json
//! { "data": [ { "v0": { "v": [0, 0, 0], "n": [0, 0, 1] },
//!               "v1": { "v": [1, 0, 0], "n": [0, 0, 1] },
//!               "v2": { "v": [0, 1, 0], "n": [0, 0, 1] } } ] }
//! ```
//!
//! Other fields (texture coordinates and so on) are ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use teapot_math::Vec3;
use thiserror::Error;

use crate::mesh::{Mesh, Triangle};

/// Errors that can occur during mesh loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No triangles found in mesh file")]
    NoTriangles,
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Deserialize)]
struct MeshFile {
    data: Vec<TriangleRecord>,
}

#[derive(Deserialize)]
struct TriangleRecord {
    v0: VertexRecord,
    v1: VertexRecord,
    v2: VertexRecord,
}

#[derive(Deserialize)]
struct VertexRecord {
    v: [f64; 3],
    n: [f64; 3],
}

impl From<TriangleRecord> for Triangle {
    fn from(record: TriangleRecord) -> Self {
        let TriangleRecord { v0, v1, v2 } = record;
        Triangle::new(
            [Vec3::from(v0.v), Vec3::from(v1.v), Vec3::from(v2.v)],
            [Vec3::from(v0.n), Vec3::from(v1.n), Vec3::from(v2.n)],
        )
    }
}

fn into_mesh(name: &str, file: MeshFile) -> LoadResult<Mesh> {
    if file.data.is_empty() {
        return Err(LoadError::NoTriangles);
    }

    let triangles: Vec<Triangle> = file.data.into_iter().map(Triangle::from).collect();
    log::info!("Loaded mesh '{}' with {} triangles", name, triangles.len());

    Ok(Mesh::new(name, triangles))
}

/// Load a mesh from a JSON file.
///
/// The mesh is named after the file stem.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    log::debug!("Reading mesh file {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    let file: MeshFile = serde_json::from_reader(reader)?;

    into_mesh(name, file)
}

/// Load a mesh from a JSON string.
pub fn load_mesh_from_str(json: &str) -> LoadResult<Mesh> {
    let file: MeshFile = serde_json::from_str(json)?;
    into_mesh("unnamed", file)
}
