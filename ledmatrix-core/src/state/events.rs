//! Lifecycle notifications
//!
//! Every notification shares one envelope so observers never have to care
//! which kind they received.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::pubsub::PubSubChannel;
use embassy_time::Instant;

/// Notifications buffered per subscriber before the oldest is dropped
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Maximum concurrent subscribers
pub const MAX_SUBSCRIBERS: usize = 4;

/// Channel a device publishes its notifications on
pub type EventChannel<M> = PubSubChannel<M, Event, EVENT_QUEUE_DEPTH, MAX_SUBSCRIBERS, 1>;

/// Identifies the device that emitted a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId(pub u8);

/// Notification kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Open completed; fires once per successful open
    Ready,
    /// Reset sequence completed; fires on every reset, including during open
    Reset,
}

impl EventKind {
    /// Event name
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Ready => "ready",
            EventKind::Reset => "reset",
        }
    }
}

/// Notification envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event {
    /// What happened
    pub kind: EventKind,
    /// Payload
    pub value: bool,
    /// Emitting device
    pub target: DeviceId,
    /// When it happened
    pub timestamp: Instant,
}

impl Event {
    /// Wrap a notification, stamped with the current time
    pub fn new(kind: EventKind, value: bool, target: DeviceId) -> Self {
        Self {
            kind,
            value,
            target,
            timestamp: Instant::now(),
        }
    }

    /// Event name, always matching [`kind`](Self::kind)
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Create a new event channel
pub const fn channel<M: RawMutex>() -> EventChannel<M> {
    PubSubChannel::new()
}
