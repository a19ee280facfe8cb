//! Interrupt vector and device delay tables.

use crate::common::{SimError, SimResult};

/// Interrupt vector table: ISR address strings indexed by vector number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VectorTable {
    addresses: Vec<String>,
}

impl VectorTable {
    /// Wraps addresses ordered by vector number.
    pub const fn new(addresses: Vec<String>) -> Self {
        Self { addresses }
    }

    /// ISR address for `vector`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::VectorOutOfRange`] if the table has no such entry.
    pub fn address(&self, vector: usize) -> SimResult<&str> {
        self.addresses
            .get(vector)
            .map(String::as_str)
            .ok_or_else(|| SimError::VectorOutOfRange {
                index: vector,
                len: self.addresses.len(),
            })
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Returns true when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Per-device ISR durations, indexed by the parameter of SYSCALL and END_IO lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DelayTable {
    delays: Vec<u64>,
}

impl DelayTable {
    /// Wraps delays ordered by device number.
    pub const fn new(delays: Vec<u64>) -> Self {
        Self { delays }
    }

    /// ISR duration for `device`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DelayOutOfRange`] if the table has no such entry.
    pub fn delay(&self, device: u64) -> SimResult<u64> {
        usize::try_from(device)
            .ok()
            .and_then(|index| self.delays.get(index).copied())
            .ok_or_else(|| SimError::DelayOutOfRange {
                index: usize::try_from(device).unwrap_or(usize::MAX),
                len: self.delays.len(),
            })
    }

    /// Number of devices.
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    /// Returns true when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}
