//! Event primitives: the `Event` trait, envelopes, and a pub/sub bus.
//!
//! The stock core uses these to hand XP awards, achievement unlocks and
//! user-facing notices to whatever collaborator is listening.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
