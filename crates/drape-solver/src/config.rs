//! Solver configuration.
//!
//! Parameters that control the mass-spring network: integration rate,
//! link stiffness/damping profile, environment forces and execution mode.

use drape_types::constants::{
    DEFAULT_FE, DEFAULT_LINK_DAMPING, DEFAULT_LINK_STIFFNESS, DEFAULT_PARTICLE_MASS,
};
use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentForces;

/// Whether the step runs its hot loops on the rayon pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    Sequential,
    #[default]
    Parallel,
}

/// Normalized link profile used when building a cloth grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// Normalized stiffness fed to `K`.
    pub stiffness: f32,
    /// Normalized damping fed to `Z`.
    pub damping: f32,
    /// Mass of every free particle.
    pub particle_mass: f32,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            stiffness: DEFAULT_LINK_STIFFNESS,
            damping: DEFAULT_LINK_DAMPING,
            particle_mass: DEFAULT_PARTICLE_MASS,
        }
    }
}

/// Configuration for the mass-spring solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Integration rate in steps per second; the step size is `1 / fe`.
    pub fe: f32,
    /// Sequential or rayon-parallel step.
    pub execution: Execution,
    /// Link profile for cloth construction.
    pub cloth: ClothConfig,
    /// Gravity and wind.
    pub environment: EnvironmentForces,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            fe: DEFAULT_FE,
            execution: Execution::default(),
            cloth: ClothConfig::default(),
            environment: EnvironmentForces::default(),
        }
    }
}

impl SolverConfig {
    /// Gravity without wind.
    pub fn still_air() -> Self {
        Self {
            environment: EnvironmentForces::gravity_only(drape_types::constants::GRAVITY),
            ..Default::default()
        }
    }

    /// Single-threaded, for debugging and reproducibility checks.
    pub fn debug() -> Self {
        Self {
            execution: Execution::Sequential,
            ..Default::default()
        }
    }

    /// Integration step size `h = 1 / fe`.
    #[inline]
    pub fn h(&self) -> f32 {
        1.0 / self.fe
    }

    /// Rejects values that make the network meaningless.
    ///
    /// Stability of the chosen `fe` against the link stiffness is not
    /// checked.
    pub fn validate(&self) -> DrapeResult<()> {
        if !(self.fe.is_finite() && self.fe > 0.0) {
            return Err(DrapeError::InvalidConfig(format!(
                "fe must be positive and finite, got {}",
                self.fe
            )));
        }
        if self.cloth.particle_mass.is_nan() || self.cloth.particle_mass <= 0.0 {
            return Err(DrapeError::InvalidConfig(format!(
                "particle_mass must be positive, got {}",
                self.cloth.particle_mass
            )));
        }
        if self.cloth.stiffness < 0.0 || self.cloth.damping < 0.0 {
            return Err(DrapeError::InvalidConfig(
                "link stiffness and damping must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
