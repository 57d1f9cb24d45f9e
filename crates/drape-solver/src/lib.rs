//! # drape-solver
//!
//! Mass-spring-damper simulation engine.
//!
//! A [`ParticleSystem`] owns a particle arena, the links between
//! particles and a set of analytic obstacles. Each call to
//! [`ParticleSystem::step`] advances the whole network synchronously:
//!
//! 1. **Links** — every spring/damper adds its force to both endpoints
//! 2. **Environment** — gravity and wind on every free particle
//! 3. **Obstacles** — one-sided penalty force on penetrating particles
//! 4. **Integration** — symplectic Euler for free particles, nothing for
//!    fixed anchors
//!
//! ## Key Types
//!
//! - [`Particle`] / [`ParticleRule`] — point mass and its update rule
//! - [`Link`] / [`LinkKind`] — pairwise force between two particle handles
//! - [`Obstacle`] / [`ObstacleShape`] — analytic repulsive volume
//! - [`EnvironmentForces`] — gravity and wind for a step
//! - [`SolverConfig`] — sub-step rate, link profile and environment

pub mod cloth;
pub mod config;
pub mod environment;
pub mod link;
pub mod obstacle;
pub mod params;
pub mod particle;
pub mod system;

pub use cloth::init_cloth_from_mesh;
pub use config::{ClothConfig, Execution, SolverConfig};
pub use environment::EnvironmentForces;
pub use link::{Link, LinkKind};
pub use obstacle::{Obstacle, ObstacleShape};
pub use particle::{Particle, ParticleRule};
pub use system::{ParticleSystem, StepResult};
