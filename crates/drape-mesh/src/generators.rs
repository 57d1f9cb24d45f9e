//! Procedural generators for the simulated plane and auxiliary strands.
//!
//! These generators produce deterministic, resolution-configurable data
//! with a fixed winding order and vertex layout, which the cloth builder
//! in `drape-solver` relies on.

use std::f32::consts::PI;

use drape_math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::mesh::{TriangleMesh, Vertex};

/// Generates a flat rectangular grid in the XY plane, centred at the origin.
///
/// Vertices are row-major: row `i` (of `divisions_h + 1`) sits at
/// `y = i / divisions_h * height - height / 2`, so the **last** row is the
/// top edge. Each row holds `divisions_w + 1` vertices. Normals face +Z.
///
/// # Example
/// ```
/// use drape_mesh::generators::plane;
/// let mesh = plane(1.0, 1.0, 2, 2);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn plane(width: f32, height: f32, divisions_w: u32, divisions_h: u32) -> TriangleMesh {
    let verts_w = divisions_w as usize + 1;
    let verts_h = divisions_h as usize + 1;
    let mut mesh = TriangleMesh::with_capacity(
        verts_w * verts_h,
        divisions_w as usize * divisions_h as usize * 2,
    );

    let half_w = width * 0.5;
    let half_h = height * 0.5;

    for i in 0..verts_h {
        for j in 0..verts_w {
            let u = j as f32 / divisions_w as f32;
            let v = i as f32 / divisions_h as f32;
            mesh.vertices.push(Vertex::new(
                Vec3::new(u * width - half_w, v * height - half_h, 0.0),
                Vec3::Z,
                Vec2::new(u, v),
            ));

            if i == 0 || j + 1 == verts_w {
                continue;
            }

            // Quad whose upper-left corner is this vertex.
            let index = (i * verts_w + j) as u32;
            let down = index - verts_w as u32;
            let diag_down = down + 1;
            let side = index + 1;

            mesh.indices.extend_from_slice(&[index, down, diag_down]);
            mesh.indices.extend_from_slice(&[diag_down, side, index]);
        }
    }

    mesh
}

/// Auxiliary curve data: polylines stored back to back in one point buffer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Strands {
    /// All control points, strand after strand.
    pub points: Vec<Vec3>,
    /// Number of points of each strand, in order.
    pub counts: Vec<u32>,
}

impl Strands {
    /// Total number of control points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of strands.
    pub fn strand_count(&self) -> usize {
        self.counts.len()
    }

    /// Control points of strand `i`.
    pub fn strand(&self, i: usize) -> &[Vec3] {
        let start: usize = self.counts[..i].iter().map(|&c| c as usize).sum();
        &self.points[start..start + self.counts[i] as usize]
    }
}

/// Generates `strand_count` wavy strands running down a `width × height`
/// sheet centred at the origin, lifted `offset` along +Z.
///
/// Strands are evenly spaced in X and run top (`+height/2`) to bottom.
pub fn strands(
    width: f32,
    height: f32,
    strand_count: u32,
    points_per_strand: u32,
    offset: f32,
) -> Strands {
    let half_w = width * 0.5;
    let half_h = height * 0.5;
    let spacing = width / strand_count.max(1) as f32;
    let segments = (points_per_strand.max(2) - 1) as f32;

    let mut points = Vec::with_capacity((strand_count * points_per_strand) as usize);
    for s in 0..strand_count {
        let x0 = (s as f32 + 0.5) * spacing - half_w;
        for k in 0..points_per_strand {
            let t = k as f32 / segments;
            let wiggle = 0.15 * spacing * (t * 4.0 * PI).sin();
            points.push(Vec3::new(x0 + wiggle, half_h - t * height, offset));
        }
    }

    Strands {
        points,
        counts: vec![points_per_strand; strand_count as usize],
    }
}
