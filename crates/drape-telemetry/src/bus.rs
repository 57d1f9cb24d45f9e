//! Frame-stamped event bus feeding the scene sinks.
//!
//! The runner queues events on an `mpsc` channel while a frame is being
//! computed. `flush` drains the queue between frames, hands each event to
//! the sinks and keeps a running count per event kind. Muted kinds are
//! counted but never reach a sink.

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::events::{EventKind, SimulationEvent};
use crate::sinks::EventSink;

/// Queue of scene events plus the sinks they drain into.
pub struct EventBus {
    queue: Sender<SimulationEvent>,
    pending: Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    muted: Vec<&'static str>,
    tally: BTreeMap<&'static str, u64>,
    enabled: bool,
}

impl EventBus {
    pub fn new() -> Self {
        let (queue, pending) = mpsc::channel();
        Self {
            queue,
            pending,
            sinks: Vec::new(),
            muted: Vec::new(),
            tally: BTreeMap::new(),
            enabled: true,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// A disabled bus drops events at `emit` without counting them.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stops delivering events named `name` (see [`SimulationEvent::name`]).
    ///
    /// Per-substep `step_completed` events dominate a scene's output;
    /// muting them keeps JSON-lines files small.
    pub fn mute(&mut self, name: &'static str) {
        if !self.muted.contains(&name) {
            self.muted.push(name);
        }
    }

    pub fn is_muted(&self, name: &str) -> bool {
        self.muted.iter().any(|m| *m == name)
    }

    /// Queues an event.
    pub fn emit(&self, event: SimulationEvent) {
        if self.enabled {
            // `pending` is owned by the bus, so the channel is never closed here.
            let _ = self.queue.send(event);
        }
    }

    /// Queues `kind` stamped with `frame`.
    pub fn emit_at(&self, frame: u32, kind: EventKind) {
        self.emit(SimulationEvent::new(frame, kind));
    }

    /// Drains the queue into the sinks in emission order.
    ///
    /// Returns how many events were delivered; muted events are counted
    /// in [`EventBus::seen`] but not here.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        for event in self.pending.try_iter() {
            let name = event.name();
            *self.tally.entry(name).or_default() += 1;
            if self.muted.contains(&name) {
                continue;
            }
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            delivered += 1;
        }
        delivered
    }

    /// Flushes, then lets every sink finish its output.
    pub fn finalize(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Number of flushed events named `name`, muted or not.
    pub fn seen(&self, name: &str) -> u64 {
        self.tally.get(name).copied().unwrap_or(0)
    }

    /// Flushed event counts keyed by event name.
    pub fn tally(&self) -> &BTreeMap<&'static str, u64> {
        &self.tally
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
