//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the FM radio firmware.
//! All pin mappings, bus addresses, periods and timeouts are centralized here.

use crate::types::Frequency;

/// I2C bus frequency for the tuner and display
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// TEA5767 I2C address (fixed by the chip)
pub const TEA5767_I2C_ADDR: u8 = 0x60;

/// SSD1306 OLED I2C address
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

/// Display width in pixels
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixels
pub const DISPLAY_HEIGHT: u32 = 64;

/// TEA5767 reference crystal (32.768 kHz watch crystal)
pub const TEA5767_XTAL_HZ: u32 = 32_768;

/// TEA5767 intermediate frequency
pub const TEA5767_IF_HZ: u32 = 225_000;

/// Station tuned on every tick, in 10 kHz units
pub const FIX_STATION_UNITS: u16 = 9_530;

/// Station tuned on every tick (95.30 MHz)
pub const FIX_STATION: Frequency = match Frequency::from_units(FIX_STATION_UNITS) {
    Some(freq) => freq,
    None => panic!("fixed station outside the FM band"),
};

/// Status refresh period
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Longest the renderer waits for the state lock before dropping a frame
pub const RENDER_LOCK_TIMEOUT_MS: u32 = 200;

/// Poll step while waiting for the state lock
pub const LOCK_POLL_INTERVAL_MS: u32 = 10;

/// Event queue depth
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Button debounce time in milliseconds
pub const BUTTON_DEBOUNCE_MS: u64 = 20;

/// Hold time before a press becomes a long press
pub const LONG_PRESS_MS: u64 = 300;

/// Repeat period while a key stays held after a long press
pub const REPEAT_INTERVAL_MS: u64 = 150;

/// Capacity of the renderer's line buffer
pub const TEXT_BUFFER_SIZE: usize = 32;

/// External header pin numbers
pub mod pins {
    //! External header pinout shown on the wiring hint

    /// External header pin carrying SDA
    pub const HEADER_SDA: u8 = 15;

    /// External header pin carrying SCL
    pub const HEADER_SCL: u8 = 16;

    /// External header pin carrying 3.3V
    pub const HEADER_VCC: u8 = 9;

    /// External header pin carrying ground
    pub const HEADER_GND: u8 = 18;
}
