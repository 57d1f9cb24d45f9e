//! Scalar type alias for the simulation.
//!
//! Vertex buffers handed to the renderer are `f32`, so the whole
//! pipeline runs in single precision.

/// The floating-point type used throughout the simulation.
pub type Scalar = f32;
