//! Integration tests for drape-math.

use drape_math::{
    barycentric_to_cartesian, cartesian_to_barycentric, closest_point_on_mesh,
    closest_point_on_mesh_with_workers, closest_point_on_triangle, project_point_on_plane,
    triangle_normal, Vec3,
};
use drape_types::TriangleId;

const T1: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const T2: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const T3: Vec3 = Vec3::new(0.0, 1.0, 0.0);

fn assert_vec_close(actual: Vec3, expected: Vec3, tol: f32) {
    assert!(
        (actual - expected).length() < tol,
        "expected {expected:?}, got {actual:?}"
    );
}

/// Row-major grid of `n × n` quads in the XY plane with a gentle Z bump.
fn bumpy_grid(n: usize) -> (Vec<Vec3>, Vec<u32>) {
    let w = n + 1;
    let mut vertices = Vec::with_capacity(w * w);
    for j in 0..w {
        for i in 0..w {
            let x = i as f32 / n as f32;
            let y = j as f32 / n as f32;
            let z = 0.1 * (x * 6.0).sin() * (y * 4.0).cos();
            vertices.push(Vec3::new(x, y, z));
        }
    }
    let mut indices = Vec::with_capacity(n * n * 6);
    for j in 0..n {
        for i in 0..n {
            let a = (j * w + i) as u32;
            let b = a + 1;
            let c = a + w as u32;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }
    (vertices, indices)
}

// ─── Barycentric Tests ────────────────────────────────────────

#[test]
fn barycentric_of_vertices() {
    assert_vec_close(cartesian_to_barycentric(T1, T1, T2, T3), Vec3::X, 1e-6);
    assert_vec_close(cartesian_to_barycentric(T2, T1, T2, T3), Vec3::Y, 1e-6);
    assert_vec_close(cartesian_to_barycentric(T3, T1, T2, T3), Vec3::Z, 1e-6);
}

#[test]
fn barycentric_round_trip_on_skewed_triangle() {
    let a = Vec3::new(0.3, -1.2, 2.0);
    let b = Vec3::new(2.5, 0.4, 1.1);
    let c = Vec3::new(-0.7, 1.9, 0.2);
    let normal = triangle_normal(a, b, c);

    for &(u, v) in &[(0.2, 0.3), (0.9, 0.05), (-0.4, 0.7), (1.5, 1.2)] {
        let p = a + u * (b - a) + v * (c - a);
        let bary = cartesian_to_barycentric(p, a, b, c);
        assert!((bary.x + bary.y + bary.z - 1.0).abs() < 1e-5);
        assert_vec_close(barycentric_to_cartesian(bary, a, b, c), p, 1e-4);

        // Off-plane points project back to the same in-plane coordinates.
        let lifted = p + 0.75 * normal;
        let projected = project_point_on_plane(lifted, normal, a);
        assert_vec_close(projected, p, 1e-4);
    }
}

#[test]
fn degenerate_triangle_is_not_finite() {
    let bary = cartesian_to_barycentric(Vec3::new(0.5, 0.0, 0.0), T1, T2, Vec3::new(2.0, 0.0, 0.0));
    assert!(!bary.is_finite());
}

// ─── Plane Tests ──────────────────────────────────────────────

#[test]
fn project_point_on_plane_removes_normal_component() {
    let p = project_point_on_plane(Vec3::new(3.0, -2.0, 5.0), Vec3::Z, Vec3::new(0.0, 0.0, 1.0));
    assert_vec_close(p, Vec3::new(3.0, -2.0, 1.0), 1e-6);
}

#[test]
fn triangle_normal_follows_winding() {
    assert_vec_close(triangle_normal(T1, T2, T3), Vec3::Z, 1e-6);
    assert_vec_close(triangle_normal(T1, T3, T2), -Vec3::Z, 1e-6);
}

// ─── Closest Point on Triangle ────────────────────────────────

#[test]
fn closest_point_above_hypotenuse() {
    let p = closest_point_on_triangle(Vec3::new(0.5, 0.5, 1.0), T1, T2, T3);
    assert_vec_close(p, Vec3::new(0.5, 0.5, 0.0), 1e-6);
}

#[test]
fn closest_point_interior_region() {
    let p = closest_point_on_triangle(Vec3::new(0.25, 0.25, 1.0), T1, T2, T3);
    assert_vec_close(p, Vec3::new(0.25, 0.25, 0.0), 1e-6);
}

#[test]
fn closest_point_edge_t1_t2() {
    let p = closest_point_on_triangle(Vec3::new(0.5, -1.0, 0.3), T1, T2, T3);
    assert_vec_close(p, Vec3::new(0.5, 0.0, 0.0), 1e-6);
}

#[test]
fn closest_point_edge_t1_t3() {
    let p = closest_point_on_triangle(Vec3::new(-1.0, 0.5, -0.3), T1, T2, T3);
    assert_vec_close(p, Vec3::new(0.0, 0.5, 0.0), 1e-6);
}

#[test]
fn closest_point_edge_t2_t3() {
    let p = closest_point_on_triangle(Vec3::new(1.0, 1.0, 0.0), T1, T2, T3);
    assert_vec_close(p, Vec3::new(0.5, 0.5, 0.0), 1e-6);
}

#[test]
fn closest_point_vertex_t1() {
    let p = closest_point_on_triangle(Vec3::new(-1.0, -1.0, 0.5), T1, T2, T3);
    assert_vec_close(p, T1, 1e-6);
}

#[test]
fn closest_point_vertex_t2() {
    let p = closest_point_on_triangle(Vec3::new(3.0, -1.0, 0.0), T1, T2, T3);
    assert_vec_close(p, T2, 1e-6);
}

#[test]
fn closest_point_vertex_t2_on_region_boundary() {
    // s + t == det exactly: resolved by the clamped branch, not the interior.
    let p = closest_point_on_triangle(Vec3::new(2.0, -1.0, 0.0), T1, T2, T3);
    assert_vec_close(p, T2, 1e-6);
}

#[test]
fn closest_point_vertex_t3() {
    let p = closest_point_on_triangle(Vec3::new(-1.0, 3.0, 0.0), T1, T2, T3);
    assert_vec_close(p, T3, 1e-6);
}

#[test]
fn closest_point_is_never_farther_than_vertices() {
    let a = Vec3::new(0.1, 0.2, 0.3);
    let b = Vec3::new(1.4, -0.3, 0.8);
    let c = Vec3::new(0.2, 1.1, -0.6);
    for &q in &[
        Vec3::new(2.0, 2.0, 2.0),
        Vec3::new(-1.0, 0.5, 0.0),
        Vec3::new(0.5, 0.2, 0.1),
        Vec3::new(0.0, -3.0, 1.0),
    ] {
        let closest = closest_point_on_triangle(q, a, b, c);
        let d = q.distance(closest);
        assert!(d <= q.distance(a) + 1e-5);
        assert!(d <= q.distance(b) + 1e-5);
        assert!(d <= q.distance(c) + 1e-5);
    }
}

// ─── Closest Point on Mesh ────────────────────────────────────

#[test]
fn closest_point_on_empty_mesh_is_none() {
    let vertices = vec![T1, T2, T3];
    assert!(closest_point_on_mesh(Vec3::ZERO, &vertices, &[]).is_none());
}

#[test]
fn closest_point_on_mesh_finds_containing_triangle() {
    let (vertices, indices) = bumpy_grid(4);
    let hit = closest_point_on_mesh(Vec3::new(0.6, 0.1, 2.0), &vertices, &indices).unwrap();

    // The point must be on the reported triangle.
    let base = hit.triangle.base();
    let a = vertices[indices[base] as usize];
    let b = vertices[indices[base + 1] as usize];
    let c = vertices[indices[base + 2] as usize];
    assert_vec_close(closest_point_on_triangle(Vec3::new(0.6, 0.1, 2.0), a, b, c), hit.point, 1e-6);
    assert!((hit.distance - Vec3::new(0.6, 0.1, 2.0).distance(hit.point)).abs() < 1e-6);
}

#[test]
fn parallel_and_sequential_agree() {
    let (vertices, indices) = bumpy_grid(24);
    let queries = [
        Vec3::new(0.13, 0.77, 0.4),
        Vec3::new(-0.5, 0.5, 0.0),
        Vec3::new(0.99, 0.01, -0.2),
        Vec3::new(0.5, 0.5, 0.05),
    ];
    for &q in &queries {
        let sequential = closest_point_on_mesh_with_workers(q, &vertices, &indices, 1).unwrap();
        for workers in [2, 3, 8, 64] {
            let parallel = closest_point_on_mesh_with_workers(q, &vertices, &indices, workers).unwrap();
            assert_eq!(parallel.triangle, sequential.triangle);
            assert_eq!(parallel.distance, sequential.distance);
        }
        let auto = closest_point_on_mesh(q, &vertices, &indices).unwrap();
        assert_eq!(auto.triangle, sequential.triangle);
    }
}

#[test]
fn ties_resolve_to_first_triangle() {
    let vertices = vec![T1, T2, T3];
    let indices: Vec<u32> = [0, 1, 2].repeat(10);
    for workers in [1, 2, 4, 10] {
        let hit = closest_point_on_mesh_with_workers(Vec3::new(0.2, 0.2, 1.0), &vertices, &indices, workers)
            .unwrap();
        assert_eq!(hit.triangle, TriangleId(0));
    }
}

#[test]
fn mesh_hit_serializes() {
    let (vertices, indices) = bumpy_grid(2);
    let hit = closest_point_on_mesh(Vec3::new(0.3, 0.3, 1.0), &vertices, &indices).unwrap();
    let json = serde_json::to_string(&hit).unwrap();
    assert!(json.contains("triangle"));
}
