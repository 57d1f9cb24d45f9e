//! Barycentric coordinates on a triangle.

use glam::Vec3;

/// Converts a point lying in the plane of `(t1, t2, t3)` to barycentric weights `(u, v, w)`.
///
/// Solves the 2×2 normal equations of `p - t1 = v (t2 - t1) + w (t3 - t1)`
/// (Ericson, *Real-Time Collision Detection* §3.4). The point must already
/// be projected onto the triangle's plane; any out-of-plane component is
/// dropped in the least-squares sense.
///
/// A zero-area triangle makes the determinant vanish and the weights come
/// back as NaN/Inf.
pub fn cartesian_to_barycentric(p: Vec3, t1: Vec3, t2: Vec3, t3: Vec3) -> Vec3 {
    let v0 = t2 - t1;
    let v1 = t3 - t1;
    let v2 = p - t1;

    let a = v0.dot(v0);
    let b = v0.dot(v1);
    let c = v1.dot(v1);
    let d = v2.dot(v0);
    let e = v2.dot(v1);

    let det = a * c - b * b;
    let v = (c * d - b * e) / det;
    let w = (a * e - b * d) / det;
    let u = 1.0 - v - w;

    Vec3::new(u, v, w)
}

/// Weighted sum `u t1 + v t2 + w t3`.
///
/// Exact inverse of [`cartesian_to_barycentric`] when the weights sum to 1.
#[inline]
pub fn barycentric_to_cartesian(bary: Vec3, t1: Vec3, t2: Vec3, t3: Vec3) -> Vec3 {
    bary.x * t1 + bary.y * t2 + bary.z * t3
}
