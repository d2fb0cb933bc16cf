//! Shared Application State
//!
//! The record the status updater writes once per tick and the renderer
//! reads on every frame. It lives behind a single mutex; nothing here
//! locks on its own.

use crate::drivers::tea5767::Registers;
use crate::hal::i2c::I2cAddress;
use crate::types::{Frequency, RadioStatus};

/// Tuner status as last observed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppState {
    /// Address of the tuner if the last probe found it
    address: Option<I2cAddress>,
    /// Furthest step reached by the last cycle
    status: RadioStatus,
    /// Frequency read back by the last cycle
    tuned: Option<Frequency>,
    /// Register mirror
    registers: Registers,
}

impl AppState {
    /// Startup state: nothing detected, power-on register defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            address: None,
            status: RadioStatus::NotFound,
            tuned: None,
            registers: Registers::DEFAULT,
        }
    }

    /// Detected tuner address
    #[must_use]
    pub const fn address(&self) -> Option<I2cAddress> {
        self.address
    }

    /// Current status
    #[must_use]
    pub const fn status(&self) -> RadioStatus {
        self.status
    }

    /// Last frequency read back from the chip
    #[must_use]
    pub const fn tuned(&self) -> Option<Frequency> {
        self.tuned
    }

    /// Register mirror
    #[must_use]
    pub const fn registers(&self) -> &Registers {
        &self.registers
    }

    pub(crate) fn set_address(&mut self, address: Option<I2cAddress>) {
        self.address = address;
    }

    pub(crate) fn set_status(&mut self, status: RadioStatus) {
        self.status = status;
    }

    pub(crate) fn set_tuned(&mut self, tuned: Option<Frequency>) {
        self.tuned = tuned;
    }

    pub(crate) fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
