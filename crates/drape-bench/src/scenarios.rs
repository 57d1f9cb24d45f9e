//! Canonical scenes for regression and performance tracking.
//!
//! All three share the same pinned sheet and strand set; they differ in
//! the obstacle placed behind the sheet, where the +Z wind pushes it.

use std::fmt;
use std::str::FromStr;

use drape_math::Vec3;
use drape_types::DrapeError;
use serde::{Deserialize, Serialize};

use crate::config::{ObstacleConfig, SceneConfig};

/// Which canonical scene to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Sheet pinned along its top edge in gravity and wind.
    HangingCloth,
    /// Sheet blown against a sphere.
    SphereDrape,
    /// Sheet blown against a cube.
    BoxDrape,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingCloth,
            ScenarioKind::SphereDrape,
            ScenarioKind::BoxDrape,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingCloth => "hanging_cloth",
            ScenarioKind::SphereDrape => "sphere_drape",
            ScenarioKind::BoxDrape => "box_drape",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = DrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                DrapeError::InvalidConfig(format!(
                    "unknown scenario '{s}', expected one of: {}",
                    names.join(", ")
                ))
            })
    }
}

/// A fully specified scene.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub config: SceneConfig,
}

impl Scenario {
    /// A 2m × 2m sheet at 16×16 divisions, pinned along the top edge,
    /// for one second at 60 frames per second.
    pub fn hanging_cloth() -> Self {
        Self {
            kind: ScenarioKind::HangingCloth,
            config: SceneConfig {
                name: ScenarioKind::HangingCloth.name().into(),
                ..Default::default()
            },
        }
    }

    /// The hanging sheet with a sphere of radius 0.4 just behind its lower half.
    pub fn sphere_drape() -> Self {
        Self {
            kind: ScenarioKind::SphereDrape,
            config: SceneConfig {
                name: ScenarioKind::SphereDrape.name().into(),
                obstacles: vec![ObstacleConfig::Sphere {
                    center: Vec3::new(0.0, -0.3, 0.45),
                    radius: 0.4,
                    stiffness: None,
                }],
                ..Default::default()
            },
        }
    }

    /// The hanging sheet with a cube of half-width 0.3 just behind its lower half.
    pub fn box_drape() -> Self {
        Self {
            kind: ScenarioKind::BoxDrape,
            config: SceneConfig {
                name: ScenarioKind::BoxDrape.name().into(),
                obstacles: vec![ObstacleConfig::Box {
                    center: Vec3::new(0.0, -0.4, 0.35),
                    half_width: 0.3,
                    stiffness: None,
                }],
                ..Default::default()
            },
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::HangingCloth => Self::hanging_cloth(),
            ScenarioKind::SphereDrape => Self::sphere_drape(),
            ScenarioKind::BoxDrape => Self::box_drape(),
        }
    }

    /// Shortens the run, for smoke tests.
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.config.frames = frames;
        self
    }
}
