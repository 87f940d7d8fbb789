//! Triangle soup geometry.
//!
//! Meshes are stored as independent triangles, each carrying its own three
//! positions and three vertex normals. There is no index buffer: this is the
//! layout the loader produces and the layout the tracer walks.

use teapot_math::Vec3;

/// A triangle with per-vertex normals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// Vertex positions
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Vertex normals (not required to be unit length)
    pub n0: Vec3,
    pub n1: Vec3,
    pub n2: Vec3,
}

impl Triangle {
    /// Create a triangle from its three positions and three vertex normals.
    pub fn new(vertices: [Vec3; 3], normals: [Vec3; 3]) -> Self {
        let [v0, v1, v2] = vertices;
        let [n0, n1, n2] = normals;
        Self {
            v0,
            v1,
            v2,
            n0,
            n1,
            n2,
        }
    }

    /// Create a triangle that carries the same normal at every vertex.
    pub fn with_normal(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3) -> Self {
        Self::new([v0, v1, v2], [normal; 3])
    }

    /// Vertex positions in order.
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Vertex normals in order.
    pub fn normals(&self) -> [Vec3; 3] {
        [self.n0, self.n1, self.n2]
    }

    /// Blend the vertex normals with barycentric weights (α, β, γ).
    ///
    /// The result is not re-normalized.
    pub fn interpolate_normal(&self, weights: Vec3) -> Vec3 {
        self.n0 * weights.x + self.n1 * weights.y + self.n2 * weights.z
    }

    /// Average of the three vertex positions.
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Apply `f` to every position and `g` to every normal.
    pub fn map(&self, f: impl Fn(Vec3) -> Vec3, g: impl Fn(Vec3) -> Vec3) -> Self {
        Self::new(
            [f(self.v0), f(self.v1), f(self.v2)],
            [g(self.n0), g(self.n1), g(self.n2)],
        )
    }

    /// True if no component of any position or normal is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.vertices()
            .iter()
            .chain(self.normals().iter())
            .all(|v| v.is_finite())
    }
}

/// A named collection of triangles in object space.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Mesh name (usually the file stem)
    pub name: String,

    /// Triangles in file order
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a mesh from a list of triangles.
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self {
            name: name.into(),
            triangles,
        }
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
