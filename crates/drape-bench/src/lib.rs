//! # drape-bench
//!
//! Scenes that wire the mass-spring solver, the driver mesh and the
//! wrap deformer together, plus a runner and benchmark metrics.
//!
//! Three canonical scenes:
//! 1. **Hanging cloth** — sheet pinned along its top edge in gravity and wind
//! 2. **Sphere drape** — the same sheet blown against a sphere
//! 3. **Box drape** — the same sheet blown against a cube
//!
//! Every scene carries a set of strands bound to the cloth.

pub mod config;
pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use config::{ClothLayout, ObstacleConfig, SceneConfig, StrandLayout};
pub use metrics::BenchmarkMetrics;
pub use runner::{BenchmarkRunner, FrameResult, SceneRunner};
pub use scenarios::{Scenario, ScenarioKind};
