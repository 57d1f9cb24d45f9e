//! # drape-wrap
//!
//! Binds a dense set of auxiliary points (strand control points) to a
//! coarse driver mesh and re-embeds them every frame as the mesh deforms.
//!
//! ## Key Types
//!
//! - [`Binding`] — triangle, barycentric weights and signed normal offset of one point
//! - [`WrapDeformer`] — owns the bindings and rest snapshot; `initialize` / `deform`
//! - [`WrapConfig`] — smoothing iterations and execution mode
//!
//! The expensive closest-triangle search runs once in
//! [`WrapDeformer::initialize`]. [`WrapDeformer::deform`] only reads the
//! stored bindings and the live triangle vertices.

pub mod binding;
pub mod config;
pub mod deformer;
pub mod smooth;

pub use binding::Binding;
pub use config::WrapConfig;
pub use deformer::WrapDeformer;
pub use smooth::smooth_displacements;
