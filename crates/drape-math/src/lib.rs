//! # drape-math
//!
//! Geometry kernel for the drape workspace.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Vec2`, etc.)
//! - Cartesian ↔ barycentric transforms on triangles
//! - Closest point on a triangle (six-region derivation) and on a
//!   triangle mesh (data-parallel scan)
//! - Plane projection and triangle normals
//!
//! None of these functions validate their input. Degenerate triangles
//! (collinear or coincident vertices) propagate NaN/Inf silently; mesh
//! quality is the caller's responsibility.

pub mod barycentric;
pub mod closest;
pub mod plane;

pub use barycentric::{barycentric_to_cartesian, cartesian_to_barycentric};
pub use closest::{
    closest_point_on_mesh, closest_point_on_mesh_with_workers, closest_point_on_triangle,
    MeshHit,
};
pub use plane::{project_point_on_plane, triangle_area, triangle_normal};

// Re-export glam types as the canonical math types for drape.
pub use glam::{Vec2, Vec3, Vec4};

/// Anything that carries a 3D position.
///
/// Lets the mesh queries run directly on vertex buffers with extra
/// attributes (normals, UVs) without copying positions out first.
pub trait HasPosition {
    fn position(&self) -> Vec3;
}

impl HasPosition for Vec3 {
    #[inline]
    fn position(&self) -> Vec3 {
        *self
    }
}

impl HasPosition for [f32; 3] {
    #[inline]
    fn position(&self) -> Vec3 {
        Vec3::from_array(*self)
    }
}
