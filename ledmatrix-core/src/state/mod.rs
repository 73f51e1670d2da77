//! Connection lifecycle
//!
//! The lifecycle is explicit and finite: a device is unopened until a bus
//! is bound and the bring-up sequence finishes. Observers learn about it
//! through [`Event`] notifications on an [`EventChannel`].

pub mod events;
pub mod machine;

pub use events::{DeviceId, Event, EventChannel, EventKind, EVENT_QUEUE_DEPTH, MAX_SUBSCRIBERS};
pub use machine::{ConnectionStatus, State, Transition};
