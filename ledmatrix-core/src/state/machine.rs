//! Lifecycle state machine
//!
//! Every change to the device lifecycle goes through
//! [`State::transition`]. A failed open lands in [`State::Failed`], which
//! still accepts a new open attempt.

use embassy_time::Instant;

/// Lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Constructed, no bus bound
    #[default]
    Unopened,
    /// Bus bound, bring-up sequence running
    Opening,
    /// Bring-up complete, accepting writes
    Ready,
    /// Last open attempt failed; the bus has been released
    Failed,
}

/// Inputs that drive the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// A bus handle was bound
    Bind,
    /// Bring-up sequence finished
    Configured,
    /// Bring-up sequence failed
    Abort,
}

impl State {
    /// Check if an open attempt may start from this state
    pub fn can_open(&self) -> bool {
        matches!(self, State::Unopened | State::Failed)
    }

    /// Check if register writes may be issued
    ///
    /// Writes are allowed while opening so the bring-up sequence can run.
    pub fn can_write(&self) -> bool {
        matches!(self, State::Opening | State::Ready)
    }

    /// Check if the device finished opening
    pub fn is_ready(&self) -> bool {
        matches!(self, State::Ready)
    }

    /// Process a transition and return the next state
    pub fn transition(self, input: Transition) -> Self {
        use State::*;
        use Transition::*;

        match (self, input) {
            (Unopened, Bind) => Opening,
            (Failed, Bind) => Opening,

            (Opening, Configured) => Ready,
            (Opening, Abort) => Failed,

            // Default: stay in current state
            _ => self,
        }
    }
}

/// Connection status record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectionStatus {
    /// Device finished opening
    pub is_open: bool,
    /// When the open completed
    pub opened_at: Option<Instant>,
}

impl ConnectionStatus {
    /// Status of a freshly opened device
    pub fn opened(at: Instant) -> Self {
        Self {
            is_open: true,
            opened_at: Some(at),
        }
    }
}
