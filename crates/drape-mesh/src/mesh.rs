//! Core triangle mesh type.
//!
//! Vertices are stored interleaved (position, normal, UV) because the
//! simulation rewrites whole vertices every frame and the renderer
//! uploads the buffer as-is. Triangle indices reference into the
//! vertex buffer, three per triangle.

use drape_math::{closest_point_on_mesh, HasPosition, MeshHit, Vec2, Vec3};
use drape_types::{DrapeError, DrapeResult, TriangleId};
use serde::{Deserialize, Serialize};

/// A mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
}

impl Vertex {
    /// Creates a vertex with the given attributes.
    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

impl HasPosition for Vertex {
    #[inline]
    fn position(&self) -> Vec3 {
        self.position
    }
}

/// An indexed triangle mesh.
///
/// Triangle indices are stored flat:
/// `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex buffer.
    pub vertices: Vec<Vertex>,
    /// Triangle indices, stride 3.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Creates a mesh from existing buffers without validating them.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.vertices[i].position
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, position: Vec3) {
        self.vertices[i].position = position;
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: TriangleId) -> [u32; 3] {
        let base = t.base();
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Returns the three corner positions of triangle `t`.
    #[inline]
    pub fn triangle_positions(&self, t: TriangleId) -> [Vec3; 3] {
        let [a, b, c] = self.triangle(t);
        [
            self.vertices[a as usize].position,
            self.vertices[b as usize].position,
            self.vertices[c as usize].position,
        ]
    }

    /// Copies all vertex positions out.
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Overwrites vertex positions from a buffer of equal length.
    pub fn set_positions(&mut self, positions: &[Vec3]) -> DrapeResult<()> {
        if positions.len() != self.vertices.len() {
            return Err(DrapeError::TopologyMismatch {
                what: "vertices",
                expected: self.vertices.len(),
                actual: positions.len(),
            });
        }
        for (vertex, &p) in self.vertices.iter_mut().zip(positions) {
            vertex.position = p;
        }
        Ok(())
    }

    /// Closest point on this mesh to `p`. See [`closest_point_on_mesh`].
    pub fn closest_point(&self, p: Vec3) -> Option<MeshHit> {
        closest_point_on_mesh(p, &self.vertices, &self.indices)
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Index count is a multiple of 3
    /// - Triangle indices are within bounds
    /// - No triangle repeats a vertex index
    pub fn validate(&self) -> DrapeResult<()> {
        let n = self.vertices.len();

        if self.indices.len() % 3 != 0 {
            return Err(DrapeError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(DrapeError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(TriangleId(t as u32));
            if a == b || b == c || a == c {
                return Err(DrapeError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from flat position data `[x0, y0, z0, x1, ...]`.
    ///
    /// UVs are taken from `uvs` when it holds two floats per vertex and
    /// zeroed otherwise. Normals start at zero; call
    /// [`compute_vertex_normals`](crate::normals::compute_vertex_normals)
    /// afterwards if they are needed.
    pub fn from_interleaved(positions: &[f32], indices: &[u32], uvs: &[f32]) -> DrapeResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(DrapeError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let has_uvs = uvs.len() == n * 2;

        let vertices = positions
            .chunks_exact(3)
            .enumerate()
            .map(|(i, p)| {
                let tex_coord = if has_uvs {
                    Vec2::new(uvs[i * 2], uvs[i * 2 + 1])
                } else {
                    Vec2::ZERO
                };
                Vertex::new(Vec3::new(p[0], p[1], p[2]), Vec3::ZERO, tex_coord)
            })
            .collect();

        let mesh = Self::new(vertices, indices.to_vec());
        mesh.validate()?;
        Ok(mesh)
    }
}
