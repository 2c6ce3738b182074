use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

// LogPublisher forwards circulation events to the tracing subscriber.
pub struct LogPublisher {}

impl LogPublisher {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for LogPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for LogPublisher {
    fn publish(&mut self, event: &DomainEvent) -> LibraryResult<()> {
        info!(
            event_id = event.event_id.as_str(),
            name = event.name.as_str(),
            key = event.key.as_str(),
            occurred_on = %event.occurred_on,
            data = event.json_data.as_str(),
            "domain event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::logs::LogPublisher;

    #[test]
    fn test_should_publish_without_retaining() {
        let mut publisher = LogPublisher::new();
        let event = DomainEvent::added(
            "item_checkout", "loan1",
            NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(), &"data").unwrap();
        publisher.publish(&event).expect("should publish");
        assert!(publisher.recorded().is_empty());
    }
}
