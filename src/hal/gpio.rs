//! GPIO Abstractions
//!
//! Type-safe GPIO pin wrappers for the radio firmware.
//! Provides semantic meaning to pins through the type system.

use embassy_stm32::exti::ExtiInput;
use embassy_time::{Duration, Timer};

use crate::config::BUTTON_DEBOUNCE_MS;

/// Button state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    /// Button is released
    Released,
    /// Button is pressed
    Pressed,
}

impl defmt::Format for ButtonState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Released => defmt::write!(f, "Released"),
            Self::Pressed => defmt::write!(f, "Pressed"),
        }
    }
}

/// Back button with edge-triggered debouncing
pub struct BackButton<'d> {
    pin: ExtiInput<'d>,
    state: ButtonState,
}

impl<'d> BackButton<'d> {
    /// Create back button (active low with pull-up)
    #[must_use]
    pub fn new(pin: ExtiInput<'d>) -> Self {
        let state = if pin.is_low() {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        };
        Self { pin, state }
    }

    /// Wait until the debounced level changes and return the new state
    pub async fn wait_for_change(&mut self) -> ButtonState {
        loop {
            self.pin.wait_for_any_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

            let level = if self.pin.is_low() {
                ButtonState::Pressed
            } else {
                ButtonState::Released
            };

            // Bounce that settled back to the old level
            if level != self.state {
                self.state = level;
                return level;
            }
        }
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> ButtonState {
        self.state
    }
}
