//! FM Radio Status Firmware Library
//!
//! This library provides the core functionality for a handheld
//! STM32WB55 board talking to a TEA5767 FM receiver on its external
//! I2C header. Once per second the firmware probes the chip, programs
//! it, tunes a fixed station and reads the frequency back; the result
//! is shown as status text on a 128x64 OLED until back is pressed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Tick (try_send)   ┌───────────────┐
//! │  tick task   │ ──────────────────▶ │               │
//! └──────────────┘                     │  event queue  │
//! ┌──────────────┐   Key (send)        │   (depth 8)   │
//! │ button task  │ ──────────────────▶ │               │
//! └──────────────┘                     └───────┬───────┘
//!                                              ▼
//!                                     ┌─────────────────┐   lock   ┌──────────┐
//!                                     │    main loop    │ ───────▶ │ AppState │
//!                                     └────────┬────────┘          └────▲─────┘
//!                                              │ Redraw                 │ lock (200 ms)
//!                                              ▼                        │
//!                                     ┌─────────────────┐               │
//!                                     │  display task   │ ──────────────┘
//!                                     └─────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Portable core**: `app`, `drivers` and `hal::i2c` are generic over
//!   `embedded-hal-async` and `RawMutex` and run in host tests
//! - **No unsafe in application code**
//! - **Explicit error handling**: driver steps return `Result`; the status
//!   updater turns failures into on-screen status

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// I2C bus wrapper and pin wrappers.
pub mod hal;

/// Peripheral Drivers
///
/// TEA5767 tuner, SSD1306 display and the tuner abstraction.
pub mod drivers;

/// Radio Status Application
///
/// Event loop, status updater, renderer and input classification.
pub mod app;

/// Embassy tasks and the statics they share
#[cfg(feature = "embedded")]
pub mod tasks;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Common traits
    pub use crate::drivers::display::Canvas;
    pub use crate::drivers::tuner::Tuner;
    pub use embedded_hal_async::i2c::I2c as _;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
