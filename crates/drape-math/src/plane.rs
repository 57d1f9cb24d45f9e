//! Plane projection and triangle orientation.

use glam::Vec3;

/// Projects `point` onto the plane through `plane_point` with unit `normal`.
#[inline]
pub fn project_point_on_plane(point: Vec3, normal: Vec3, plane_point: Vec3) -> Vec3 {
    let to_point = point - plane_point;
    point - to_point.dot(normal) * normal
}

/// Unit normal of triangle `(t1, t2, t3)`, from `(t1 - t2) × (t2 - t3)`.
///
/// Same orientation as `(t2 - t1) × (t3 - t1)`. Not guarded: a degenerate
/// triangle yields a non-finite vector.
#[inline]
pub fn triangle_normal(t1: Vec3, t2: Vec3, t3: Vec3) -> Vec3 {
    (t1 - t2).cross(t2 - t3).normalize()
}

/// Area of triangle `(t1, t2, t3)`.
#[inline]
pub fn triangle_area(t1: Vec3, t2: Vec3, t3: Vec3) -> f32 {
    0.5 * (t2 - t1).cross(t3 - t1).length()
}
