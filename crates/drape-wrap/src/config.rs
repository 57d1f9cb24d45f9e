//! Deformer configuration.

use drape_types::constants::DEFAULT_SMOOTH_ITERATIONS;
use serde::{Deserialize, Serialize};

/// Runtime parameters of a [`crate::WrapDeformer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    /// Laplacian relaxation passes over the displacement field. 0 disables smoothing.
    pub smooth_iterations: u32,
    /// Bind and re-embed points on the rayon pool.
    pub parallel: bool,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            smooth_iterations: DEFAULT_SMOOTH_ITERATIONS,
            parallel: true,
        }
    }
}
