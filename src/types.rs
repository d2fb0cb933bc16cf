//! Shared types used across the FM radio firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

/// FM broadcast frequency in 10 kHz units
///
/// `9530` is 95.30 MHz. Values are validated against the FM broadcast
/// band the TEA5767 covers in its Europe/US band-limit setting.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u16);

impl Frequency {
    /// Lower band edge (87.50 MHz)
    pub const MIN_UNITS: u16 = 8_750;

    /// Upper band edge (108.00 MHz)
    pub const MAX_UNITS: u16 = 10_800;

    /// Hertz per unit
    pub const HZ_PER_UNIT: u32 = 10_000;

    /// Create a new Frequency from 10 kHz units, returns None if out of band
    #[must_use]
    pub const fn from_units(units: u16) -> Option<Self> {
        if units >= Self::MIN_UNITS && units <= Self::MAX_UNITS {
            Some(Self(units))
        } else {
            None
        }
    }

    /// Create a Frequency from Hz, rounded to the nearest 10 kHz
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        let step = Self::HZ_PER_UNIT as u64;
        let units = (hz as u64 + step / 2) / step;
        if units > u16::MAX as u64 {
            return None;
        }
        Self::from_units(units as u16)
    }

    /// Get the frequency in 10 kHz units
    #[must_use]
    pub const fn as_units(self) -> u16 {
        self.0
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0 as u32 * Self::HZ_PER_UNIT
    }

    /// Get the frequency in kHz
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 as u32 * 10
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} x 10 kHz)", self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02} MHz", self.0 / 100, self.0 % 100)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} x 10 kHz", self.0);
    }
}

/// Progress of the last probe/init/tune cycle
///
/// Purely advisory: it drives the status text on screen and nothing else.
/// Programming the registers and programming the frequency both report
/// `WriteSuccess`; the two steps share one label on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum RadioStatus {
    /// No device answered the bus probe
    #[default]
    NotFound,
    /// Device answered the bus probe
    Found,
    /// Register initialization or frequency write succeeded
    WriteSuccess,
    /// Frequency read-back succeeded
    ReadSuccess,
    /// Combined write and read succeeded
    WriteReadSuccess,
}

impl RadioStatus {
    /// Text shown on the status line
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotFound => "I2C NOT FOUND",
            Self::Found => "FOUND DEVICE",
            Self::WriteSuccess => "WRITE SUCCESS",
            Self::ReadSuccess => "READ SUCCESS",
            Self::WriteReadSuccess => "WRITE/READ SUCCESS",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.label());
    }
}
