//! Domain events and the sink trait services emit them through.

mod domain_event;
mod sink;

pub use domain_event::DomainEvent;
pub use sink::{DomainEventSink, MockDomainEventSink, NoOpDomainEventSink};
