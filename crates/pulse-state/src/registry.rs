//! State registry - per-frame dispatch and event routing

use pulse_core::{PulseError, PulseResult, StateKey};
use pulse_wire::EventStream;

use crate::State;

/// Registry of frame-loop states
///
/// The registry holds non-owning handles: the caller keeps ownership of
/// every state and the registry borrows them mutably for its lifetime.
/// One event stream lives here and is handed, in registration order, to
/// every active state during `tick`. While `tick` runs the registry is
/// exclusively borrowed, so no state can add or remove registrations
/// mid-frame.
pub struct StateRegistry<'a> {
    states: Vec<&'a mut dyn State>,
    events: EventStream,
}

impl<'a> StateRegistry<'a> {
    pub fn new() -> Self {
        StateRegistry {
            states: Vec::new(),
            events: EventStream::new(),
        }
    }

    /// Registry with a custom event arena capacity
    pub fn with_event_capacity(capacity: usize) -> Self {
        StateRegistry {
            states: Vec::new(),
            events: EventStream::with_capacity(capacity),
        }
    }

    /// Register a state
    ///
    /// Registration order is dispatch order. Two states with the same
    /// key would be indistinguishable to name lookup, so a key collision
    /// (the same name twice, or an FNV collision between two names) is
    /// rejected.
    pub fn add(&mut self, state: &'a mut dyn State) -> PulseResult<()> {
        let key = state.key();
        if self.states.iter().any(|s| s.key() == key) {
            return Err(PulseError::DuplicateState(key));
        }
        self.states.push(state);
        Ok(())
    }

    /// Number of registered states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// First registered state matching the name's key
    fn find(&mut self, name: &str) -> Option<&mut &'a mut dyn State> {
        let key = StateKey::from_name(name);
        self.states.iter_mut().find(|s| s.key() == key)
    }

    /// Activate the named state; an unknown name is a no-op
    pub fn activate(&mut self, name: &str) {
        match self.find(name) {
            Some(state) => state.activate(),
            None => tracing::debug!(name, "activate: no state with this name"),
        }
    }

    /// Deactivate the named state; an unknown name is a no-op
    pub fn deactivate(&mut self, name: &str) {
        match self.find(name) {
            Some(state) => state.deactivate(),
            None => tracing::debug!(name, "deactivate: no state with this name"),
        }
    }

    /// Run one frame
    ///
    /// Resets the event stream exactly once, then updates every active
    /// state in registration order, handing each the same stream.
    pub fn tick(&mut self, dt: f32) {
        self.events.reset();
        for state in self.states.iter_mut() {
            if state.is_active() {
                state.update(dt, &mut self.events);
            }
        }
        tracing::trace!(
            states = self.states.len(),
            events = self.events.record_count(),
            "tick"
        );
    }

    /// Render every active state in registration order
    ///
    /// Leaves the event stream untouched, so the frame's events stay
    /// readable after rendering.
    pub fn render(&mut self) {
        for state in self.states.iter_mut() {
            if state.is_active() {
                state.render();
            }
        }
    }

    /// This frame's event stream
    pub fn events(&self) -> &EventStream {
        &self.events
    }

    /// True if any events were appended this frame
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Number of events appended this frame
    pub fn event_count(&self) -> u32 {
        self.events.record_count()
    }

    /// Kind tag of the event at `index`
    pub fn event_kind(&self, index: u32) -> PulseResult<u32> {
        self.events.kind_of(index)
    }

    /// Payload size of the event at `index`
    pub fn event_size(&self, index: u32) -> PulseResult<usize> {
        self.events.size_of(index)
    }

    /// True if any event this frame carries the given kind
    pub fn contains_event(&self, kind: u32) -> bool {
        self.events.contains_kind(kind)
    }

    /// Copy the payload of the event at `index` into `out`
    pub fn read_event(&self, index: u32, out: &mut [u8]) -> PulseResult<usize> {
        self.events.read_into(index, out)
    }
}

impl Default for StateRegistry<'_> {
    fn default() -> Self {
        StateRegistry::new()
    }
}
