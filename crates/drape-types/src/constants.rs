//! Physical constants and simulation defaults.

/// Gravitational acceleration magnitude, applied along −Y.
pub const GRAVITY: f32 = 9.81;

/// Default constant wind vector `[x, y, z]`.
pub const DEFAULT_WIND: [f32; 3] = [12.0, 0.0, 5.0];

/// Default integration sub-step rate (steps per second). `h = 1 / fe`.
pub const DEFAULT_FE: f32 = 1000.0;

/// Default normalized link stiffness fed to the `K` helper.
pub const DEFAULT_LINK_STIFFNESS: f32 = 0.2;

/// Default normalized link damping fed to the `Z` helper.
pub const DEFAULT_LINK_DAMPING: f32 = 0.03;

/// Default mass of a free cloth particle.
pub const DEFAULT_PARTICLE_MASS: f32 = 1.0;

/// Default number of Laplacian relaxation passes on the wrap displacement field.
pub const DEFAULT_SMOOTH_ITERATIONS: u32 = 3;

/// Below this many triangles the closest-point search stays on the calling thread.
pub const PARALLEL_TRIANGLE_THRESHOLD: usize = 256;

/// Area threshold under which a bound triangle is reported as degenerate.
pub const DEGENERATE_AREA_THRESHOLD: f32 = 1.0e-10;
