//! Tuner Abstraction
//!
//! The four bus steps the status updater drives on every tick. Implemented
//! by the TEA5767 driver on target and by scripted fakes in tests.

use crate::drivers::tea5767::Registers;
use crate::hal::i2c::I2cAddress;
use crate::types::Frequency;

/// FM tuner reachable over I2C
#[allow(async_fn_in_trait)]
pub trait Tuner {
    /// Driver error type
    type Error;

    /// Fixed bus address of the chip
    const ADDRESS: I2cAddress;

    /// Check whether the chip answers on the bus
    async fn is_device_ready(&mut self) -> bool;

    /// Load the power-on configuration into `registers` and write it
    async fn init(&mut self, registers: &mut Registers) -> Result<(), Self::Error>;

    /// Program `freq` into `registers` and write them
    async fn set_frequency(
        &mut self,
        registers: &mut Registers,
        freq: Frequency,
    ) -> Result<(), Self::Error>;

    /// Read the status bytes into `registers` and decode the tuned frequency
    async fn get_frequency(&mut self, registers: &mut Registers) -> Result<Frequency, Self::Error>;
}
