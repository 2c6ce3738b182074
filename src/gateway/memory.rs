use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

// MemoryPublisher retains every published event in order, so callers can
// audit what the circulation service emitted.
pub struct MemoryPublisher {
    events: Vec<DomainEvent>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for MemoryPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for MemoryPublisher {
    fn publish(&mut self, event: &DomainEvent) -> LibraryResult<()> {
        self.events.push(event.clone());
        Ok(())
    }

    fn recorded(&self) -> &[DomainEvent] {
        self.events.as_slice()
    }
}
