//! The surface-binding deformer.

use drape_math::{closest_point_on_mesh_with_workers, triangle_area, Vec3};
use drape_mesh::TriangleMesh;
use drape_types::constants::DEGENERATE_AREA_THRESHOLD;
use drape_types::{DrapeError, DrapeResult};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::binding::Binding;
use crate::config::WrapConfig;
use crate::smooth::smooth_displacements;

/// Binds auxiliary points to a driver mesh and re-embeds them as it deforms.
///
/// The deformer owns its bindings and the rest snapshot of the points.
/// The driver mesh and point buffers are borrowed per call and never
/// retained; the mesh is only read.
#[derive(Debug, Clone, Default)]
pub struct WrapDeformer {
    bindings: Vec<Binding>,
    rest_points: Vec<Vec3>,
    segments: Vec<u32>,
    bound_triangles: usize,
    degenerate: usize,
    config: WrapConfig,
}

impl WrapDeformer {
    /// Creates an unbound deformer with default smoothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unbound deformer with the given configuration.
    pub fn with_config(config: WrapConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Whether `initialize` produced at least one binding.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// Binds every point to its closest triangle of `mesh`.
    ///
    /// Discards any previous binding and snapshots `points` as the rest
    /// state used by smoothing. Points bound to a near-zero-area triangle
    /// get unusable weights and are reported with a warning.
    pub fn initialize(&mut self, points: &[Vec3], mesh: &TriangleMesh) -> DrapeResult<()> {
        self.bindings.clear();
        self.rest_points.clear();
        self.bound_triangles = 0;
        self.degenerate = 0;

        if points.is_empty() {
            return Ok(());
        }
        if mesh.triangle_count() == 0 {
            return Err(DrapeError::InvalidMesh(
                "cannot bind points to a mesh without triangles".into(),
            ));
        }

        let bindings: Option<Vec<Binding>> = if self.config.parallel {
            points.par_iter().map(|&p| bind_point(p, mesh)).collect()
        } else {
            points.iter().map(|&p| bind_point(p, mesh)).collect()
        };
        let bindings = bindings.ok_or_else(|| {
            DrapeError::InvalidMesh("no finite closest triangle for an auxiliary point".into())
        })?;

        let degenerate = bindings
            .iter()
            .filter(|b| {
                let [t1, t2, t3] = mesh.triangle_positions(b.triangle);
                !b.is_finite() || triangle_area(t1, t2, t3) < DEGENERATE_AREA_THRESHOLD
            })
            .count();
        if degenerate > 0 {
            warn!(degenerate, "points bound to degenerate triangles");
        }

        self.bindings = bindings;
        self.degenerate = degenerate;
        self.rest_points = points.to_vec();
        self.bound_triangles = mesh.triangle_count();

        debug!(
            points = self.bindings.len(),
            triangles = self.bound_triangles,
            "wrap binding initialized"
        );
        Ok(())
    }

    /// Re-embeds `points` on the current state of `mesh`, then smooths.
    ///
    /// A no-op when unbound. `mesh` must have the triangle layout it had
    /// at binding time.
    pub fn deform(&self, points: &mut [Vec3], mesh: &TriangleMesh) -> DrapeResult<()> {
        if !self.is_initialized() {
            return Ok(());
        }
        if points.len() != self.bindings.len() {
            return Err(DrapeError::TopologyMismatch {
                what: "points",
                expected: self.bindings.len(),
                actual: points.len(),
            });
        }
        if mesh.triangle_count() != self.bound_triangles {
            return Err(DrapeError::TopologyMismatch {
                what: "triangles",
                expected: self.bound_triangles,
                actual: mesh.triangle_count(),
            });
        }
        if !self.segments.is_empty() {
            let covered: usize = self.segments.iter().map(|&c| c as usize).sum();
            if covered != points.len() {
                return Err(DrapeError::TopologyMismatch {
                    what: "segment points",
                    expected: points.len(),
                    actual: covered,
                });
            }
        }

        let vertices = &mesh.vertices;
        let indices = &mesh.indices;
        if self.config.parallel {
            points
                .par_iter_mut()
                .zip(self.bindings.par_iter())
                .for_each(|(point, binding)| *point = binding.embed_on(vertices, indices));
        } else {
            for (point, binding) in points.iter_mut().zip(&self.bindings) {
                *point = binding.embed_on(vertices, indices);
            }
        }

        smooth_displacements(
            points,
            &self.rest_points,
            self.config.smooth_iterations,
            &self.segments,
        );
        Ok(())
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Points bound to a degenerate triangle by the last `initialize`.
    pub fn degenerate_count(&self) -> usize {
        self.degenerate
    }

    /// Point positions captured by the last `initialize`.
    pub fn rest_points(&self) -> &[Vec3] {
        &self.rest_points
    }

    pub fn config(&self) -> &WrapConfig {
        &self.config
    }

    pub fn smooth_iterations(&self) -> u32 {
        self.config.smooth_iterations
    }

    /// Sets the number of smoothing passes; 0 disables smoothing.
    pub fn set_smooth_iterations(&mut self, iterations: u32) {
        self.config.smooth_iterations = iterations;
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.config.parallel = parallel;
    }

    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    /// Declares the points as consecutive curves of the given lengths.
    ///
    /// Smoothing then never blends across two curves. An empty list
    /// treats all points as one path. The counts must sum to the number
    /// of points passed to `deform`.
    pub fn set_segments(&mut self, counts: Vec<u32>) {
        self.segments = counts;
    }
}

fn bind_point(point: Vec3, mesh: &TriangleMesh) -> Option<Binding> {
    let hit = closest_point_on_mesh_with_workers(point, &mesh.vertices, &mesh.indices, 1)?;
    let [t1, t2, t3] = mesh.triangle_positions(hit.triangle);
    Some(Binding::compute(point, hit.triangle, t1, t2, t3))
}
