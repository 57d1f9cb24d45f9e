//! Vertex normal computation from triangle mesh data.

use drape_math::triangle_normal;
use drape_types::TriangleId;

use crate::mesh::TriangleMesh;

/// Recompute vertex normals as the normalized sum of adjacent unit face normals.
///
/// Faces whose normal is not finite (zero area) are skipped, and a vertex
/// with no usable face keeps a zero normal.
pub fn compute_vertex_normals(mesh: &mut TriangleMesh) {
    for vertex in mesh.vertices.iter_mut() {
        vertex.normal = drape_math::Vec3::ZERO;
    }

    for t in 0..mesh.triangle_count() {
        let id = TriangleId(t as u32);
        let [a, b, c] = mesh.triangle_positions(id);
        let normal = triangle_normal(a, b, c);
        if !normal.is_finite() {
            continue;
        }
        for idx in mesh.triangle(id) {
            mesh.vertices[idx as usize].normal += normal;
        }
    }

    for vertex in mesh.vertices.iter_mut() {
        vertex.normal = vertex.normal.normalize_or_zero();
    }
}
