pub mod events;
pub mod factory;
pub mod logs;
pub mod memory;

// How circulation events leave the system: logged through tracing, or
// recorded in memory for inspection by tests and reporting callers.
#[derive(Debug, PartialEq)]
pub enum GatewayPublisherVia {
    Log,
    Memory,
}

#[cfg(test)]
mod tests {
    use crate::gateway::GatewayPublisherVia;

    #[test]
    fn test_should_create_publisher_via() {
        let _ = GatewayPublisherVia::Log;
        let _ = GatewayPublisherVia::Memory;
    }
}
