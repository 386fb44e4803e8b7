use crate::core::models::event::Event;
use crate::core::traits::event_log::EventLog;

/// Audit log held in process memory. It only grows; nothing is pruned.
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: Vec<Event>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventLog for MemoryEventLog {
    fn append(&mut self, event: Event) {
        self.events.push(event);
    }

    fn events(&self) -> &[Event] {
        &self.events
    }
}
