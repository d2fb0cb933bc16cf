//! Hardware Abstraction Layer
//!
//! Provides safe abstractions over STM32WB55 peripherals.
//! The I2C layer is generic and builds on the host; pin wrappers
//! need the embassy-stm32 HAL.

#[cfg(feature = "embedded")]
pub mod gpio;
pub mod i2c;
