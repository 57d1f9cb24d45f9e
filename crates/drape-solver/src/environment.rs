//! Environment forces applied to every free particle.

use drape_math::Vec3;
use drape_types::constants::{DEFAULT_WIND, GRAVITY};
use serde::{Deserialize, Serialize};

/// Gravity and wind for a simulation step.
///
/// Passed explicitly into each step so several simulations can run with
/// different environments side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentForces {
    /// Gravity magnitude, applied as the force `(0, -gravity, 0)`.
    pub gravity: f32,
    /// Constant wind force.
    pub wind: Vec3,
}

impl Default for EnvironmentForces {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            wind: Vec3::from_array(DEFAULT_WIND),
        }
    }
}

impl EnvironmentForces {
    /// No external forces: links and obstacles only.
    pub fn none() -> Self {
        Self {
            gravity: 0.0,
            wind: Vec3::ZERO,
        }
    }

    /// Gravity of the given magnitude, still air.
    pub fn gravity_only(gravity: f32) -> Self {
        Self {
            gravity,
            wind: Vec3::ZERO,
        }
    }

    /// Total external force on one free particle.
    #[inline]
    pub fn force(&self) -> Vec3 {
        Vec3::new(0.0, -self.gravity, 0.0) + self.wind
    }
}
