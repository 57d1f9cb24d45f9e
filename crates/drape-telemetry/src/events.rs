//! Scene event types.
//!
//! Lightweight value types emitted by the scene runner, tagged with the
//! frame they belong to.

use serde::{Deserialize, Serialize};

/// An event emitted while running a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Simulated time at the start of the frame (seconds).
        sim_time: f64,
    },

    /// One mass-spring step finished.
    StepCompleted {
        particles: u32,
        links: u32,
        /// Wall-clock time of the step (seconds).
        wall_time: f64,
    },

    /// Auxiliary points were bound to the driver mesh.
    BindingInitialized {
        points: u32,
        triangles: u32,
        /// Points bound to a degenerate triangle.
        degenerate: u32,
    },

    /// Auxiliary points were re-embedded on the current driver mesh.
    DeformCompleted {
        points: u32,
        smooth_iterations: u32,
        /// Wall-clock time of the deform call (seconds).
        wall_time: f64,
    },

    /// Energy snapshot of the particle system.
    Energy {
        /// Kinetic energy of free particles (0.5 * m * v^2).
        kinetic: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Wall-clock time for the entire frame (seconds).
        wall_time: f64,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u32, kind: EventKind) -> Self {
        Self { frame, kind }
    }

    /// Short snake_case name of the payload variant.
    pub fn name(&self) -> &'static str {
        match self.kind {
            EventKind::FrameBegin { .. } => "frame_begin",
            EventKind::StepCompleted { .. } => "step_completed",
            EventKind::BindingInitialized { .. } => "binding_initialized",
            EventKind::DeformCompleted { .. } => "deform_completed",
            EventKind::Energy { .. } => "energy",
            EventKind::FrameEnd { .. } => "frame_end",
        }
    }
}
