//! Closest-point queries against triangles and triangle meshes.
//!
//! The triangle query follows Eberly's derivation in
//! *Distance Between Point and Triangle in 3D* (geometrictools.com):
//! the triangle is parameterized as `t1 + s e0 + t e1` and the squared
//! distance is minimized over the `(s, t)` domain, split into seven
//! regions by the lines `s = 0`, `t = 0` and `s + t = 1`.

use drape_types::constants::PARALLEL_TRIANGLE_THRESHOLD;
use drape_types::TriangleId;
use glam::Vec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::HasPosition;

/// Result of a closest-point-on-mesh query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshHit {
    /// Closest point on the mesh surface.
    pub point: Vec3,
    /// Triangle containing `point`.
    pub triangle: TriangleId,
    /// Euclidean distance from the query point to `point`.
    pub distance: f32,
}

/// Returns the point of triangle `(t1, t2, t3)` closest to `p`.
///
/// Region boundaries use strict comparisons, so a parameter landing
/// exactly on `s + t = det` (or on `s = 0`, `t = 0`) is resolved by the
/// clamped-edge branch rather than the interior branch.
pub fn closest_point_on_triangle(p: Vec3, t1: Vec3, t2: Vec3, t3: Vec3) -> Vec3 {
    let e0 = t2 - t1;
    let e1 = t3 - t1;
    let diff = t1 - p;

    let a = e0.dot(e0);
    let b = e0.dot(e1);
    let c = e1.dot(e1);
    let d = e0.dot(diff);
    let e = e1.dot(diff);

    let det = a * c - b * b;
    let mut s = b * e - c * d;
    let mut t = b * d - a * e;

    if s + t < det {
        if s < 0.0 {
            if t < 0.0 {
                // Region 4: vertex t1, minimum on one of the two adjacent edges.
                if d < 0.0 {
                    s = (-d / a).clamp(0.0, 1.0);
                    t = 0.0;
                } else {
                    s = 0.0;
                    t = (-e / c).clamp(0.0, 1.0);
                }
            } else {
                // Region 3: edge t1–t3.
                s = 0.0;
                t = (-e / c).clamp(0.0, 1.0);
            }
        } else if t < 0.0 {
            // Region 5: edge t1–t2.
            s = (-d / a).clamp(0.0, 1.0);
            t = 0.0;
        } else {
            // Region 0: interior.
            let inv_det = 1.0 / det;
            s *= inv_det;
            t *= inv_det;
        }
    } else if s < 0.0 {
        // Region 2: vertex t3, minimum on edge t2–t3 or t1–t3.
        let tmp0 = b + d;
        let tmp1 = c + e;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a - 2.0 * b + c;
            s = (numer / denom).clamp(0.0, 1.0);
            t = 1.0 - s;
        } else {
            s = 0.0;
            t = (-e / c).clamp(0.0, 1.0);
        }
    } else if t < 0.0 {
        // Region 6: vertex t2, minimum on edge t2–t3 or t1–t2.
        let tmp0 = b + e;
        let tmp1 = a + d;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a - 2.0 * b + c;
            t = (numer / denom).clamp(0.0, 1.0);
            s = 1.0 - t;
        } else {
            t = 0.0;
            s = (-d / a).clamp(0.0, 1.0);
        }
    } else {
        // Region 1: edge t2–t3.
        let numer = c + e - b - d;
        let denom = a - 2.0 * b + c;
        s = (numer / denom).clamp(0.0, 1.0);
        t = 1.0 - s;
    }

    t1 + s * e0 + t * e1
}

/// Finds the closest point to `p` over every triangle of an indexed mesh.
///
/// Small meshes are scanned on the calling thread; larger ones are split
/// into one chunk per rayon worker. Returns `None` when `indices` holds no
/// complete triangle (or only degenerate ones). On exactly equal distances
/// the lowest triangle index wins, independent of the worker count.
pub fn closest_point_on_mesh<V>(p: Vec3, vertices: &[V], indices: &[u32]) -> Option<MeshHit>
where
    V: HasPosition + Sync,
{
    let triangle_count = indices.len() / 3;
    let workers = if triangle_count < PARALLEL_TRIANGLE_THRESHOLD {
        1
    } else {
        rayon::current_num_threads()
    };
    closest_point_on_mesh_with_workers(p, vertices, indices, workers)
}

/// [`closest_point_on_mesh`] with an explicit number of triangle chunks.
///
/// Each chunk keeps its own partial minimum; partials are reduced in chunk
/// order so the result is identical for any `workers >= 1`.
pub fn closest_point_on_mesh_with_workers<V>(
    p: Vec3,
    vertices: &[V],
    indices: &[u32],
    workers: usize,
) -> Option<MeshHit>
where
    V: HasPosition + Sync,
{
    let triangle_count = indices.len() / 3;
    if triangle_count == 0 {
        return None;
    }

    let workers = workers.clamp(1, triangle_count);
    if workers == 1 {
        return scan_triangles(p, vertices, indices, 0, triangle_count);
    }

    let chunk_triangles = triangle_count.div_ceil(workers);
    let partials: Vec<Option<MeshHit>> = (0..workers)
        .into_par_iter()
        .map(|w| {
            let begin = w * chunk_triangles;
            let end = ((w + 1) * chunk_triangles).min(triangle_count);
            scan_triangles(p, vertices, indices, begin, end)
        })
        .collect();

    partials.into_iter().flatten().fold(None, |best, hit| match best {
        Some(b) if b.distance <= hit.distance => Some(b),
        _ => Some(hit),
    })
}

/// Sequential minimum over triangles `begin..end`.
///
/// Strict `<` keeps the first hit on ties; a NaN distance never wins.
fn scan_triangles<V: HasPosition>(
    p: Vec3,
    vertices: &[V],
    indices: &[u32],
    begin: usize,
    end: usize,
) -> Option<MeshHit> {
    let mut best: Option<MeshHit> = None;

    for tri in begin..end {
        let base = tri * 3;
        let a = vertices[indices[base] as usize].position();
        let b = vertices[indices[base + 1] as usize].position();
        let c = vertices[indices[base + 2] as usize].position();

        let point = closest_point_on_triangle(p, a, b, c);
        let distance = p.distance(point);

        let closer = match best {
            Some(ref hit) => distance < hit.distance,
            None => distance < f32::MAX,
        };
        if closer {
            best = Some(MeshHit {
                point,
                triangle: TriangleId(tri as u32),
                distance,
            });
        }
    }

    best
}
