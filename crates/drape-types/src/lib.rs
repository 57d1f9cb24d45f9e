//! # drape-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the drape cloth simulation and surface-binding workspace.
//!
//! This crate has zero domain logic; it defines the vocabulary
//! that all other drape crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{DrapeError, DrapeResult};
pub use ids::{LinkId, ObstacleId, ParticleId, TriangleId};
pub use scalar::Scalar;
