//! Per-point surface binding.

use drape_math::{
    barycentric_to_cartesian, cartesian_to_barycentric, project_point_on_plane, triangle_normal,
    HasPosition, Vec3,
};
use drape_types::TriangleId;
use serde::{Deserialize, Serialize};

/// Where an auxiliary point sits relative to its driver triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// Bound triangle.
    pub triangle: TriangleId,
    /// Barycentric weights of the point's projection on the triangle plane.
    pub barycentric: Vec3,
    /// Signed distance along the triangle normal.
    pub normal_offset: f32,
}

impl Binding {
    /// Binds `point` to triangle `(t1, t2, t3)`.
    ///
    /// The offset is positive when the point lies on the side the normal
    /// points to. A degenerate triangle yields non-finite weights.
    pub fn compute(point: Vec3, triangle: TriangleId, t1: Vec3, t2: Vec3, t3: Vec3) -> Self {
        let normal = triangle_normal(t1, t2, t3);
        let projected = project_point_on_plane(point, normal, t1);
        let barycentric = cartesian_to_barycentric(projected, t1, t2, t3);

        let mut normal_offset = point.distance(projected);
        if normal.dot(point - projected) < 0.0 {
            normal_offset = -normal_offset;
        }

        Self {
            triangle,
            barycentric,
            normal_offset,
        }
    }

    /// Reconstructs the bound point on the live triangle `(t1, t2, t3)`.
    #[inline]
    pub fn embed(&self, t1: Vec3, t2: Vec3, t3: Vec3) -> Vec3 {
        let normal = triangle_normal(t1, t2, t3);
        barycentric_to_cartesian(self.barycentric, t1, t2, t3) + normal * self.normal_offset
    }

    /// Reconstructs the bound point on a mesh given as vertex and index buffers.
    #[inline]
    pub fn embed_on<V: HasPosition>(&self, vertices: &[V], indices: &[u32]) -> Vec3 {
        let base = self.triangle.base();
        self.embed(
            vertices[indices[base] as usize].position(),
            vertices[indices[base + 1] as usize].position(),
            vertices[indices[base + 2] as usize].position(),
        )
    }

    /// Whether the weights and offset are usable.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.barycentric.is_finite() && self.normal_offset.is_finite()
    }
}
