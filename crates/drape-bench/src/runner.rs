//! Scene runner: builds a scene from its config and advances it frame by frame.

use std::time::Instant;

use drape_math::Vec3;
use drape_mesh::generators::{plane, strands};
use drape_mesh::normals::compute_vertex_normals;
use drape_mesh::TriangleMesh;
use drape_solver::{init_cloth_from_mesh, ParticleSystem};
use drape_telemetry::{EventBus, EventKind};
use drape_types::DrapeResult;
use drape_wrap::WrapDeformer;
use tracing::{debug, info};

use crate::config::SceneConfig;
use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Timing of one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    pub frame: u32,
    /// Wall-clock time for the whole frame (seconds).
    pub wall_time: f64,
    /// Wall-clock time of the deform call (seconds).
    pub deform_time: f64,
    pub kinetic_energy: f64,
}

/// A built scene: cloth network, driver mesh and bound strands.
///
/// Each frame runs `substeps` solver steps, copies the particles into
/// the driver mesh, recomputes its normals and re-embeds the strands.
pub struct SceneRunner {
    config: SceneConfig,
    system: ParticleSystem,
    mesh: TriangleMesh,
    deformer: WrapDeformer,
    strand_points: Vec<Vec3>,
    strand_counts: Vec<u32>,
    initial_positions: Vec<Vec3>,
    frame: u32,
}

impl SceneRunner {
    /// Validates `config`, builds the cloth and binds the strands to it.
    pub fn new(config: &SceneConfig) -> DrapeResult<Self> {
        config.validate()?;

        let layout = &config.cloth;
        let mesh = plane(
            layout.width,
            layout.height,
            layout.divisions_w,
            layout.divisions_h,
        );

        let mut system = ParticleSystem::new();
        for obstacle in &config.obstacles {
            system.add_obstacle(obstacle.to_obstacle(config.solver.fe));
        }
        init_cloth_from_mesh(
            &mut system,
            &mesh.vertices,
            layout.divisions_w,
            layout.divisions_h,
            config.solver.fe,
            &config.solver.cloth,
        )?;

        let set = strands(
            layout.width,
            layout.height,
            config.strands.count,
            config.strands.points_per_strand,
            config.strands.offset,
        );
        let mut deformer = WrapDeformer::with_config(config.wrap);
        deformer.set_segments(set.counts.clone());
        deformer.initialize(&set.points, &mesh)?;

        debug!(
            scene = %config.name,
            particles = system.particles.len(),
            links = system.links.len(),
            strand_points = set.points.len(),
            "scene built"
        );

        Ok(Self {
            config: config.clone(),
            initial_positions: system.positions(),
            system,
            mesh,
            deformer,
            strand_points: set.points,
            strand_counts: set.counts,
            frame: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Driver mesh as of the last completed frame.
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn deformer(&self) -> &WrapDeformer {
        &self.deformer
    }

    /// Current strand points, all strands back to back.
    pub fn strand_points(&self) -> &[Vec3] {
        &self.strand_points
    }

    /// Point count of each strand.
    pub fn strand_counts(&self) -> &[u32] {
        &self.strand_counts
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Simulated seconds elapsed.
    pub fn sim_time(&self) -> f64 {
        self.frame as f64 * self.config.frame_time() as f64
    }

    /// Announces the binding on `bus`.
    pub fn emit_binding(&self, bus: &EventBus) {
        bus.emit_at(self.frame, EventKind::BindingInitialized {
            points: self.deformer.bindings().len() as u32,
            triangles: self.mesh.triangle_count() as u32,
            degenerate: self.deformer.degenerate_count() as u32,
        });
    }

    /// Advances one frame and emits its events on `bus`.
    pub fn step_frame(&mut self, bus: &EventBus) -> DrapeResult<FrameResult> {
        let frame = self.frame;
        let start = Instant::now();
        bus.emit_at(frame, EventKind::FrameBegin { sim_time: self.sim_time() });

        let solver = &self.config.solver;
        let h = solver.h();
        for _ in 0..self.config.substeps {
            let result = self.system.step(h, &solver.environment, solver.execution);
            bus.emit_at(frame, EventKind::StepCompleted {
                particles: result.particles as u32,
                links: result.links as u32,
                wall_time: result.wall_time,
            });
        }

        self.system.write_positions(&mut self.mesh)?;
        compute_vertex_normals(&mut self.mesh);

        let deform_start = Instant::now();
        self.deformer.deform(&mut self.strand_points, &self.mesh)?;
        let deform_time = deform_start.elapsed().as_secs_f64();
        bus.emit_at(frame, EventKind::DeformCompleted {
            points: self.strand_points.len() as u32,
            smooth_iterations: self.deformer.smooth_iterations(),
            wall_time: deform_time,
        });

        let kinetic_energy = self.system.kinetic_energy();
        bus.emit_at(frame, EventKind::Energy { kinetic: kinetic_energy });

        let wall_time = start.elapsed().as_secs_f64();
        bus.emit_at(frame, EventKind::FrameEnd { wall_time });
        self.frame += 1;

        Ok(FrameResult {
            frame,
            wall_time,
            deform_time,
            kinetic_energy,
        })
    }

    /// Runs every configured frame, flushing `bus` after each one.
    pub fn run(&mut self, bus: &mut EventBus) -> DrapeResult<BenchmarkMetrics> {
        let total_start = Instant::now();
        self.emit_binding(bus);
        bus.flush();

        let mut frame_times = Vec::with_capacity(self.config.frames as usize);
        let mut deform_total = 0.0;
        let mut final_ke = self.system.kinetic_energy();

        for _ in 0..self.config.frames {
            let result = self.step_frame(bus)?;
            bus.flush();
            frame_times.push(result.wall_time);
            deform_total += result.deform_time;
            final_ke = result.kinetic_energy;
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();
        let frames = frame_times.len();
        let (avg_frame, avg_deform) = if frames == 0 {
            (0.0, 0.0)
        } else {
            (
                frame_times.iter().sum::<f64>() / frames as f64,
                deform_total / frames as f64,
            )
        };
        let min_frame = frame_times.iter().copied().fold(f64::MAX, f64::min);
        let max_frame = frame_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: self.config.name.clone(),
            particle_count: self.system.particles.len(),
            link_count: self.system.links.len(),
            triangle_count: self.mesh.triangle_count(),
            strand_points: self.strand_points.len(),
            frames: self.config.frames,
            substeps: self.config.substeps,
            total_wall_time,
            avg_frame_time: avg_frame,
            min_frame_time: if frames == 0 { 0.0 } else { min_frame },
            max_frame_time: max_frame,
            avg_deform_time: avg_deform,
            final_kinetic_energy: final_ke,
            max_displacement: max_distance(&self.system.positions(), &self.initial_positions),
            max_strand_displacement: max_distance(
                &self.strand_points,
                self.deformer.rest_points(),
            ),
        };

        info!(
            scene = %metrics.scenario,
            frames = metrics.frames,
            wall_time = metrics.total_wall_time,
            "scene finished"
        );
        Ok(metrics)
    }
}

fn max_distance(a: &[Vec3], b: &[Vec3]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(p, q)| p.distance(*q))
        .fold(0.0, f32::max)
}

/// Runs canonical scenes and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Builds and runs a single scenario.
    pub fn run(scenario: &Scenario, bus: &mut EventBus) -> DrapeResult<BenchmarkMetrics> {
        let mut runner = SceneRunner::new(&scenario.config)?;
        runner.run(bus)
    }

    /// Runs every canonical scenario with its default configuration.
    pub fn run_all(bus: &mut EventBus) -> DrapeResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind), bus))
            .collect()
    }
}
