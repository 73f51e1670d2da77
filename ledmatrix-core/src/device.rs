//! Device lifecycle and write path
//!
//! A [`Device`] owns its settings, its connection status and, once opened,
//! the [`Transport`] bound to the caller's bus handle. The register-level
//! protocol (intensity, decode mode, bring-up sequence...) lives in
//! [`crate::protocol`] and goes through [`Device::write`].
//!
//! # Usage
//!
//! ```ignore
//! static EVENTS: EventChannel<CriticalSectionRawMutex> = PubSubChannel::new();
//!
//! let mut display = Device::new(Settings::default().with_intensity(Intensity::named("max")))
//!     .with_events(&EVENTS);
//! display.open(SpiDeviceHandle::new(spi)).await?;
//! display.set_pattern(0b0111_0111, 0).await?;
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{NoopRawMutex, RawMutex};
use embassy_sync::mutex::Mutex;
use embassy_sync::pubsub::DynImmediatePublisher;
use embassy_time::{Duration, Instant};
use ledmatrix_hal::BusHandle;

use crate::config::Settings;
use crate::error::{Error, StatusError};
use crate::state::{ConnectionStatus, DeviceId, Event, EventChannel, EventKind, State, Transition};
use crate::transport::{Strategy, Transport, Written};

/// Display controller on a serial bus
pub struct Device<'a, B> {
    id: DeviceId,
    pub(crate) settings: RefCell<Settings>,
    status: ConnectionStatus,
    state: State,
    transport: Mutex<NoopRawMutex, Option<Transport<B>>>,
    events: Option<DynImmediatePublisher<'a, Event>>,
}

impl<'a, B: BusHandle> Device<'a, B> {
    /// Create an unopened device
    pub fn new(settings: Settings) -> Self {
        Self {
            id: DeviceId::default(),
            settings: RefCell::new(settings),
            status: ConnectionStatus::default(),
            state: State::Unopened,
            transport: Mutex::new(None),
            events: None,
        }
    }

    /// Tag notifications from this device with `id`
    pub fn with_id(mut self, id: DeviceId) -> Self {
        self.id = id;
        self
    }

    /// Publish notifications on `channel`
    pub fn with_events<M: RawMutex>(mut self, channel: &'a EventChannel<M>) -> Self {
        self.events = Some(channel.dyn_immediate_publisher());
        self
    }

    /// Device identifier
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Connection status record
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Check if the device finished opening
    pub fn is_open(&self) -> bool {
        self.status.is_open
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> Settings {
        self.settings.borrow().clone()
    }

    /// Write strategy bound to the bus, if any
    pub fn strategy(&mut self) -> Option<Strategy> {
        self.transport.get_mut().as_ref().map(Transport::strategy)
    }

    /// Open the device on `bus`
    ///
    /// Binds a write strategy, runs the bring-up sequence and emits
    /// [`EventKind::Ready`]. On failure the bus is released and the device
    /// may be opened again with another handle.
    pub async fn open(&mut self, bus: B) -> Result<bool, Error<B::Error>> {
        if !self.state.can_open() || self.status.is_open {
            return Err(StatusError::AlreadyOpen(self.status).into());
        }

        let timeout = self
            .settings
            .get_mut()
            .write_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms)));
        let transport = Transport::bind(bus)?.with_timeout(timeout);

        #[cfg(feature = "defmt")]
        defmt::debug!("device {} bound to {} bus", self.id, transport.strategy());

        *self.transport.get_mut() = Some(transport);
        self.state = self.state.transition(Transition::Bind);

        match self.reset().await {
            Ok(_) => {
                self.status = ConnectionStatus::opened(Instant::now());
                self.state = self.state.transition(Transition::Configured);
                self.emit(EventKind::Ready, true);
                Ok(true)
            }
            Err(error) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("device {} failed to open", self.id);

                *self.transport.get_mut() = None;
                self.state = self.state.transition(Transition::Abort);
                Err(error)
            }
        }
    }

    /// Write raw bytes as a single bus transaction
    ///
    /// Fails with [`StatusError::NotOpen`] until the device is open. Bus
    /// failures keep their strategy's kind ([`Error::Write`] or
    /// [`Error::WriteMessage`]). Payloads longer than
    /// [`MAX_FRAME_SIZE`](ledmatrix_hal::MAX_FRAME_SIZE) fail with
    /// [`Error::PayloadTooLarge`] before reaching the bus, whichever
    /// strategy is bound.
    pub async fn write(&self, data: &[u8]) -> Result<Written, Error<B::Error>> {
        if !self.state.can_write() {
            return Err(StatusError::NotOpen(self.status).into());
        }

        let mut transport = self.transport.lock().await;
        match transport.as_mut() {
            Some(transport) => transport.write(data).await,
            None => Err(StatusError::NotOpen(self.status).into()),
        }
    }

    /// Publish a notification wrapped in the common envelope
    pub fn emit(&self, kind: EventKind, value: bool) -> Event {
        let event = Event::new(kind, value, self.id);

        #[cfg(feature = "defmt")]
        defmt::trace!("device {} emits {}", self.id, kind.name());

        if let Some(events) = &self.events {
            events.publish_immediate(event);
        }
        event
    }

    /// Emit [`EventKind::Reset`]; every reset sequence ends here
    pub(crate) fn notify_reset(&self) -> bool {
        self.emit(EventKind::Reset, true);
        true
    }
}
