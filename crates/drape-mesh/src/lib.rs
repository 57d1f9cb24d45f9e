//! # drape-mesh
//!
//! Triangle mesh representation for the driver surface that auxiliary
//! points are bound to.
//!
//! ## Key Types
//!
//! - [`Vertex`] — position, normal and texture coordinate, laid out the
//!   way the renderer consumes them.
//! - [`TriangleMesh`] — vertex buffer plus a flat, stride-3 index buffer.
//! - [`Strands`] — concatenated polylines used as auxiliary curve data.
//! - Procedural generators for the simulated plane and test strands.

pub mod generators;
pub mod mesh;
pub mod normals;

pub use generators::Strands;
pub use mesh::{TriangleMesh, Vertex};
