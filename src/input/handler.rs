use crate::input::events::MapEvent;
use std::collections::VecDeque;

/// Event queue for a map, drained by its owner
#[derive(Debug, Default)]
pub struct EventManager {
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Drain all queued events in emission order
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_queue.drain(..).collect()
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}
