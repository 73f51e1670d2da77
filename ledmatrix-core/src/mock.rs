//! Mock bus handles shared by the unit tests

use std::vec::Vec;

use ledmatrix_hal::{BusHandle, Capabilities, Frame, TransferResult, Unsupported};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    Unsupported,
    /// Injected failure
    Bus,
    /// Frame declared fewer bytes than it carries
    ShortFrame,
}

impl From<Unsupported> for MockError {
    fn from(_: Unsupported) -> Self {
        MockError::Unsupported
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Logged {
    Write(Vec<u8>),
    Transfer(Vec<Frame>),
}

/// Records every call; optionally fails or hangs
pub struct MockBus {
    caps: Capabilities,
    pub log: Vec<Logged>,
    fail_at: Option<usize>,
    hang: bool,
}

impl MockBus {
    fn with_caps(caps: Capabilities) -> Self {
        Self {
            caps,
            log: Vec::new(),
            fail_at: None,
            hang: false,
        }
    }

    /// Byte-stream handle
    pub fn stream() -> Self {
        Self::with_caps(Capabilities::WRITE)
    }

    /// Framed-transfer handle
    pub fn framed() -> Self {
        Self::with_caps(Capabilities::TRANSFER)
    }

    /// Handle exposing neither operation
    pub fn null() -> Self {
        Self::with_caps(Capabilities::NONE)
    }

    /// Handle exposing both operations
    pub fn both() -> Self {
        Self::with_caps(Capabilities {
            write: true,
            transfer: true,
        })
    }

    /// Fail the `n`th call (0-based)
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    /// Never complete a call
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    /// Payload of every call, whichever strategy carried it
    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.log
            .iter()
            .flat_map(|entry| match entry {
                Logged::Write(data) => std::vec![data.clone()],
                Logged::Transfer(frames) => {
                    frames.iter().map(|f| f.bytes().to_vec()).collect()
                }
            })
            .collect()
    }

    /// Number of calls logged with this exact payload
    pub fn count(&self, payload: &[u8]) -> usize {
        self.payloads().iter().filter(|p| p.as_slice() == payload).count()
    }

    /// Index of the first call with this payload
    pub fn position(&self, payload: &[u8]) -> Option<usize> {
        self.payloads().iter().position(|p| p.as_slice() == payload)
    }

    fn should_fail(&self) -> bool {
        self.fail_at == Some(self.log.len() - 1)
    }
}

impl BusHandle for MockBus {
    type Error = MockError;

    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        if !self.caps.write {
            return Err(Unsupported.into());
        }
        if self.hang {
            core::future::pending::<()>().await;
        }
        self.log.push(Logged::Write(data.to_vec()));
        if self.should_fail() {
            return Err(MockError::Bus);
        }
        Ok(data.len())
    }

    async fn transfer(&mut self, message: &[Frame]) -> Result<TransferResult, Self::Error> {
        if !self.caps.transfer {
            return Err(Unsupported.into());
        }
        if self.hang {
            core::future::pending::<()>().await;
        }
        self.log.push(Logged::Transfer(message.to_vec()));
        if self.should_fail() {
            return Err(MockError::Bus);
        }
        if message.iter().any(|f| f.byte_length < f.send_buffer.len()) {
            return Err(MockError::ShortFrame);
        }
        Ok(TransferResult {
            byte_length: message.iter().map(|f| f.send_buffer.len()).sum(),
        })
    }
}
