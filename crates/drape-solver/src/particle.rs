//! Point masses and their per-step update rule.

use drape_math::Vec3;
use serde::{Deserialize, Serialize};

/// How a particle advances at the end of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleRule {
    /// Symplectic (leapfrog) Euler integration of the accumulated force.
    Free,
    /// Immovable anchor: velocity and force are cleared, position never changes.
    Fixed,
}

/// A point mass in the network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Force accumulated since the last update.
    pub force: Vec3,
    /// Mass. Always > 0 for free particles; unused by fixed ones.
    pub mass: f32,
    pub rule: ParticleRule,
}

impl Particle {
    /// A freely simulated particle at rest.
    pub fn free(position: Vec3, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            mass,
            rule: ParticleRule::Free,
        }
    }

    /// An immovable anchor.
    pub fn fixed_point(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            mass: 0.0,
            rule: ParticleRule::Fixed,
        }
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.rule == ParticleRule::Fixed
    }

    /// Runs the particle's update rule and clears the force accumulator.
    #[inline]
    pub fn update(&mut self, dt: f32) {
        match self.rule {
            ParticleRule::Free => {
                self.velocity += self.force / self.mass * dt;
                self.position += self.velocity * dt;
            }
            ParticleRule::Fixed => {
                self.velocity = Vec3::ZERO;
            }
        }
        self.force = Vec3::ZERO;
    }

    /// Kinetic energy `½ m |v|²` (zero for anchors).
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        match self.rule {
            ParticleRule::Free => 0.5 * self.mass as f64 * self.velocity.length_squared() as f64,
            ParticleRule::Fixed => 0.0,
        }
    }
}
