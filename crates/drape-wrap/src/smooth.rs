//! Laplacian relaxation of a displacement field along point paths.
//!
//! Points are treated as polylines: point `i` has neighbours `i - 1` and
//! `i + 1` within its segment. The field being relaxed is the
//! displacement from the rest snapshot, not the absolute positions, so a
//! rigid motion of the driver mesh passes through unchanged.

use std::ops::Range;

use glam::Vec3;

/// Splits `len` points into contiguous segments of the given sizes.
///
/// An empty `segments` slice means one segment covering every point.
pub fn segment_ranges(len: usize, segments: &[u32]) -> Vec<Range<usize>> {
    if segments.is_empty() {
        return vec![0..len];
    }
    let mut start = 0;
    segments
        .iter()
        .map(|&count| {
            let range = start..start + count as usize;
            start = range.end;
            range
        })
        .collect()
}

/// Relaxes `points - rest` for `iterations` Jacobi passes and writes
/// `rest + smoothed` back into `points`.
///
/// Each pass replaces a displacement with the mean of itself and its
/// in-segment neighbours, reading only the previous pass.
pub fn smooth_displacements(points: &mut [Vec3], rest: &[Vec3], iterations: u32, segments: &[u32]) {
    debug_assert_eq!(points.len(), rest.len());
    if iterations == 0 || points.is_empty() {
        return;
    }

    let mut source: Vec<Vec3> = points.iter().zip(rest).map(|(p, r)| *p - *r).collect();
    let mut target = vec![Vec3::ZERO; source.len()];
    let ranges = segment_ranges(source.len(), segments);

    for _ in 0..iterations {
        for range in &ranges {
            for i in range.clone() {
                let mut delta = source[i];
                let mut weight = 1.0;
                if i > range.start {
                    delta += source[i - 1];
                    weight += 1.0;
                }
                if i + 1 < range.end {
                    delta += source[i + 1];
                    weight += 1.0;
                }
                target[i] = delta / weight;
            }
        }
        std::mem::swap(&mut source, &mut target);
    }

    for ((point, r), delta) in points.iter_mut().zip(rest).zip(&source) {
        *point = *r + *delta;
    }
}
