//! Events, event distribution and lifecycle extension points.
//!
//! - [`Event`]: versioned facts emitted by aggregates.
//! - [`execute`]: decide + evolve in one step.
//! - [`EventBus`]: pub/sub transport (used for real-time user notifications).
//! - [`Listeners`]: ordered registry behind every host lifecycle hook.

pub mod bus;
pub mod event;
pub mod handler;
pub mod in_memory_bus;
pub mod listener;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use listener::Listeners;
