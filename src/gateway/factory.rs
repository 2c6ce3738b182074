use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::LogPublisher;
use crate::gateway::memory::MemoryPublisher;

pub fn create_publisher(via: GatewayPublisherVia) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Log => Box::new(LogPublisher::new()),
        GatewayPublisherVia::Memory => Box::new(MemoryPublisher::new()),
    }
}
