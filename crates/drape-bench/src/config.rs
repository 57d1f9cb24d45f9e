//! Scene configuration, loadable from TOML.

use std::path::Path;

use drape_math::Vec3;
use drape_solver::obstacle::Obstacle;
use drape_solver::params::obstacle_stiffness;
use drape_solver::SolverConfig;
use drape_types::{DrapeError, DrapeResult};
use drape_wrap::WrapConfig;
use serde::{Deserialize, Serialize};

/// Size and resolution of the simulated sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothLayout {
    pub width: f32,
    pub height: f32,
    pub divisions_w: u32,
    pub divisions_h: u32,
}

impl Default for ClothLayout {
    fn default() -> Self {
        Self {
            width: 2.0,
            height: 2.0,
            divisions_w: 16,
            divisions_h: 16,
        }
    }
}

/// Strands hanging over the cloth, bound with the wrap deformer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrandLayout {
    pub count: u32,
    pub points_per_strand: u32,
    /// Distance in front of the sheet (+Z).
    pub offset: f32,
}

impl Default for StrandLayout {
    fn default() -> Self {
        Self {
            count: 24,
            points_per_strand: 32,
            offset: 0.02,
        }
    }
}

/// A fixed collision volume.
///
/// Stiffness defaults to `fe²` of the scene's solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ObstacleConfig {
    Sphere {
        center: Vec3,
        radius: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stiffness: Option<f32>,
    },
    Box {
        center: Vec3,
        half_width: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stiffness: Option<f32>,
    },
}

impl ObstacleConfig {
    /// Builds the solver obstacle for integration rate `fe`.
    pub fn to_obstacle(&self, fe: f32) -> Obstacle {
        match *self {
            ObstacleConfig::Sphere {
                center,
                radius,
                stiffness,
            } => Obstacle::sphere(
                center,
                radius,
                stiffness.unwrap_or_else(|| obstacle_stiffness(fe)),
            ),
            ObstacleConfig::Box {
                center,
                half_width,
                stiffness,
            } => Obstacle::cube(
                center,
                half_width,
                stiffness.unwrap_or_else(|| obstacle_stiffness(fe)),
            ),
        }
    }

    fn size(&self) -> f32 {
        match *self {
            ObstacleConfig::Sphere { radius, .. } => radius,
            ObstacleConfig::Box { half_width, .. } => half_width,
        }
    }
}

/// Everything needed to build and run a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub name: String,
    /// Rendered frames to simulate.
    pub frames: u32,
    /// Solver steps of `1 / fe` per frame.
    pub substeps: u32,
    pub cloth: ClothLayout,
    pub solver: SolverConfig,
    pub strands: StrandLayout,
    pub wrap: WrapConfig,
    pub obstacles: Vec<ObstacleConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "scene".into(),
            frames: 60,
            substeps: 16,
            cloth: ClothLayout::default(),
            solver: SolverConfig::default(),
            strands: StrandLayout::default(),
            wrap: WrapConfig::default(),
            obstacles: Vec::new(),
        }
    }
}

impl SceneConfig {
    /// Parses a TOML document; missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> DrapeResult<Self> {
        toml::from_str(text).map_err(|e| DrapeError::Serialization(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> DrapeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> DrapeResult<String> {
        toml::to_string(self).map_err(|e| DrapeError::Serialization(e.to_string()))
    }

    /// Simulated seconds per frame.
    pub fn frame_time(&self) -> f32 {
        self.substeps as f32 * self.solver.h()
    }

    pub fn validate(&self) -> DrapeResult<()> {
        self.solver.validate()?;

        let cloth = &self.cloth;
        if cloth.divisions_w == 0 || cloth.divisions_h == 0 {
            return Err(DrapeError::InvalidConfig(format!(
                "cloth divisions must be at least 1, got {}x{}",
                cloth.divisions_w, cloth.divisions_h
            )));
        }
        if !positive(cloth.width) || !positive(cloth.height) {
            return Err(DrapeError::InvalidConfig(format!(
                "cloth size must be positive, got {}x{}",
                cloth.width, cloth.height
            )));
        }
        if self.substeps == 0 {
            return Err(DrapeError::InvalidConfig("substeps must be at least 1".into()));
        }
        if self.strands.count > 0 && self.strands.points_per_strand < 2 {
            return Err(DrapeError::InvalidConfig(
                "strands need at least 2 points each".into(),
            ));
        }
        if let Some(bad) = self.obstacles.iter().find(|o| !positive(o.size())) {
            return Err(DrapeError::InvalidConfig(format!(
                "obstacle size must be positive: {bad:?}"
            )));
        }
        Ok(())
    }
}

/// False for zero, negative and NaN.
fn positive(x: f32) -> bool {
    x > 0.0
}
