//! In-process event fan-out.
//!
//! Core services publish [`DomainEvent`]s through an injected sink; the
//! server forwards them onto a broadcast bus that the SSE endpoint drains
//! per subscriber. Lagging subscribers drop events rather than block
//! writers.

use tokio::sync::broadcast;

use pocketledger_core::events::{DomainEvent, DomainEventSink};

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: DomainEvent) {
        // Err just means nobody is listening right now
        let _ = self.tx.send(event);
    }
}

/// Bridges core's sink trait onto the broadcast bus.
pub struct BusEventSink {
    bus: EventBus,
}

impl BusEventSink {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl DomainEventSink for BusEventSink {
    fn emit(&self, event: DomainEvent) {
        self.bus.publish(event);
    }
}
