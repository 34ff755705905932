//! Domain event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Trait for receiving domain events.
///
/// Core services emit events through this trait after successful mutations.
///
/// # Design Rules
///
/// - `emit()` must be fast and non-blocking (no network calls, no DB writes)
/// - Failure to emit must not affect domain operations (best-effort)
pub trait DomainEventSink: Send + Sync {
    /// Emit a single domain event.
    fn emit(&self, event: DomainEvent);
}

/// No-op implementation for tests or contexts that don't need events.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {
        // Intentionally empty - events are discarded
    }
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink_does_not_panic() {
        let sink = NoOpDomainEventSink;
        sink.emit(DomainEvent::goals_changed("u-1"));
    }

    #[test]
    fn test_mock_sink_collects_events() {
        let sink = MockDomainEventSink::new();
        assert!(sink.is_empty());

        sink.emit(DomainEvent::transactions_changed("u-1"));
        sink.emit(DomainEvent::goal_completed("u-1", "g-1"));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.events()[1].user_id(), "u-1");
    }
}
