//! Pairwise spring/damper forces between two particles.

use drape_math::Vec3;
use drape_types::ParticleId;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// Force rule of a link, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    Spring,
    Damper,
    SpringDamper,
}

/// A force relationship between two particles of the same arena.
///
/// A link only ever feeds the force accumulators of its endpoints; it
/// never touches their positions or velocities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub p1: ParticleId,
    pub p2: ParticleId,
    pub stiffness: f32,
    pub damping: f32,
    pub rest_length: f32,
    pub kind: LinkKind,
}

impl Link {
    /// Hookean spring pulling the endpoints towards `rest_length`.
    pub fn spring(p1: ParticleId, p2: ParticleId, stiffness: f32, rest_length: f32) -> Self {
        Self {
            p1,
            p2,
            stiffness,
            damping: 0.0,
            rest_length,
            kind: LinkKind::Spring,
        }
    }

    /// Linear damper opposing the endpoints' relative velocity.
    pub fn damper(p1: ParticleId, p2: ParticleId, damping: f32) -> Self {
        Self {
            p1,
            p2,
            stiffness: 0.0,
            damping,
            rest_length: 0.0,
            kind: LinkKind::Damper,
        }
    }

    /// Spring and damper acting along the same axis.
    pub fn spring_damper(
        p1: ParticleId,
        p2: ParticleId,
        stiffness: f32,
        rest_length: f32,
        damping: f32,
    ) -> Self {
        Self {
            p1,
            p2,
            stiffness,
            damping,
            rest_length,
            kind: LinkKind::SpringDamper,
        }
    }

    /// Force this link applies to `p1`. `p2` receives the opposite.
    ///
    /// Both terms act along the current separation axis `p1 - p2`; a
    /// zero-length separation has no axis and contributes nothing.
    #[inline]
    pub fn force(&self, particles: &[Particle]) -> Vec3 {
        let a = &particles[self.p1.index()];
        let b = &particles[self.p2.index()];

        let diff = a.position - b.position;
        let axis = diff.normalize_or_zero();

        match self.kind {
            LinkKind::Spring => self.spring_force(diff, axis),
            LinkKind::Damper => self.damper_force(a.velocity - b.velocity, axis),
            LinkKind::SpringDamper => {
                self.spring_force(diff, axis) + self.damper_force(a.velocity - b.velocity, axis)
            }
        }
    }

    #[inline]
    fn spring_force(&self, diff: Vec3, axis: Vec3) -> Vec3 {
        -self.stiffness * (diff.length() - self.rest_length) * axis
    }

    #[inline]
    fn damper_force(&self, relative_velocity: Vec3, axis: Vec3) -> Vec3 {
        -self.damping * relative_velocity.dot(axis) * axis
    }
}
