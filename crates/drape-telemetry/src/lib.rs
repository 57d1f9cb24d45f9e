//! # drape-telemetry
//!
//! Event bus for scene telemetry. The scene runner emits structured
//! events (step timing, binding, deform, energy) that are dispatched to
//! pluggable sinks: an in-memory collector, a `tracing` logger and a
//! JSON-lines writer.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, JsonLinesSink, TracingSink, VecSink};
