//! The simulation network: particle arena, links and obstacles.

use std::time::Instant;

use drape_math::Vec3;
use drape_mesh::TriangleMesh;
use drape_types::{DrapeError, DrapeResult, LinkId, ObstacleId, ParticleId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::Execution;
use crate::environment::EnvironmentForces;
use crate::link::Link;
use crate::obstacle::Obstacle;
use crate::particle::Particle;

/// Result of a simulation step.
#[derive(Debug, Clone, Copy)]
pub struct StepResult {
    /// Number of particles advanced.
    pub particles: usize,
    /// Number of links evaluated.
    pub links: usize,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Particles, links and obstacles of one simulated object.
///
/// Links address particles through [`ParticleId`] handles into
/// `particles`. Removing or reordering particles after links were built
/// invalidates those handles, so topology is built once and then only
/// stepped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    pub links: Vec<Link>,
    pub obstacles: Vec<Obstacle>,
}

impl ParticleSystem {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a particle and returns its handle.
    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        self.particles.push(particle);
        ParticleId((self.particles.len() - 1) as u32)
    }

    /// Adds a link between two existing particles.
    pub fn add_link(&mut self, link: Link) -> LinkId {
        debug_assert!(link.p1.index() < self.particles.len());
        debug_assert!(link.p2.index() < self.particles.len());
        self.links.push(link);
        LinkId((self.links.len() - 1) as u32)
    }

    /// Adds an obstacle.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> ObstacleId {
        self.obstacles.push(obstacle);
        ObstacleId((self.obstacles.len() - 1) as u32)
    }

    /// Removes all particles, links and obstacles.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.links.clear();
        self.obstacles.clear();
    }

    #[inline]
    pub fn particle(&self, id: ParticleId) -> &Particle {
        &self.particles[id.index()]
    }

    /// Adds an external force to one particle for the next step.
    #[inline]
    pub fn apply_force(&mut self, id: ParticleId, force: Vec3) {
        self.particles[id.index()].force += force;
    }

    /// Advances the network by `dt`.
    ///
    /// Both execution modes accumulate every particle's forces in the
    /// same order (links in link order, environment, obstacles in
    /// obstacle order) and produce bit-identical results.
    pub fn step(&mut self, dt: f32, env: &EnvironmentForces, execution: Execution) -> StepResult {
        let start = Instant::now();

        match execution {
            Execution::Sequential => self.step_sequential(dt, env),
            Execution::Parallel => self.step_parallel(dt, env),
        }

        StepResult {
            particles: self.particles.len(),
            links: self.links.len(),
            wall_time: start.elapsed().as_secs_f64(),
        }
    }

    fn step_sequential(&mut self, dt: f32, env: &EnvironmentForces) {
        for link in &self.links {
            let f = link.force(&self.particles);
            self.particles[link.p1.index()].force += f;
            self.particles[link.p2.index()].force -= f;
        }

        let external = env.force();
        let obstacles = &self.obstacles;
        for particle in self.particles.iter_mut() {
            finish_particle(particle, external, obstacles, dt);
        }
    }

    fn step_parallel(&mut self, dt: f32, env: &EnvironmentForces) {
        // Each link writes its own slot; the scatter onto shared
        // endpoints stays sequential and in link order.
        let particles = &self.particles;
        let link_forces: Vec<Vec3> = self
            .links
            .par_iter()
            .map(|link| link.force(particles))
            .collect();

        for (link, f) in self.links.iter().zip(link_forces) {
            self.particles[link.p1.index()].force += f;
            self.particles[link.p2.index()].force -= f;
        }

        let external = env.force();
        let obstacles = &self.obstacles;
        self.particles
            .par_iter_mut()
            .for_each(|particle| finish_particle(particle, external, obstacles, dt));
    }

    /// Total kinetic energy of the free particles.
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    /// Copies all particle positions out.
    pub fn positions(&self) -> Vec<Vec3> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Writes particle positions into a mesh whose vertices are in particle order.
    pub fn write_positions(&self, mesh: &mut TriangleMesh) -> DrapeResult<()> {
        if mesh.vertex_count() != self.particles.len() {
            return Err(DrapeError::TopologyMismatch {
                what: "vertices",
                expected: self.particles.len(),
                actual: mesh.vertex_count(),
            });
        }
        for (vertex, particle) in mesh.vertices.iter_mut().zip(&self.particles) {
            vertex.position = particle.position;
        }
        Ok(())
    }
}

/// Environment and obstacle forces, then the particle's update rule.
#[inline]
fn finish_particle(particle: &mut Particle, external: Vec3, obstacles: &[Obstacle], dt: f32) {
    if !particle.is_fixed() {
        particle.force += external;
    }
    for obstacle in obstacles {
        particle.force += obstacle.repulsion(particle.position);
    }
    particle.update(dt);
}
