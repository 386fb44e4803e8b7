use crate::core::models::event::Event;

/// Port for the append-only audit log.
pub trait EventLog: Send + Sync {
    /// Append an event at the end of the log.
    fn append(&mut self, event: Event);

    /// All events in append order.
    fn events(&self) -> &[Event];

    fn len(&self) -> usize {
        self.events().len()
    }

    fn is_empty(&self) -> bool {
        self.events().is_empty()
    }

    /// The most recently appended event.
    fn last(&self) -> Option<&Event> {
        self.events().last()
    }
}
