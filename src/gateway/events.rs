use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;

pub trait EventPublisher {
    fn publish(&mut self, event: &DomainEvent) -> LibraryResult<()>;

    // Events retained by this publisher, oldest first. Publishers that
    // forward elsewhere retain nothing.
    fn recorded(&self) -> &[DomainEvent] {
        &[]
    }
}
