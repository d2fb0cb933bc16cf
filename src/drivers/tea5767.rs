//! TEA5767 FM Receiver Driver
//!
//! The TEA5767 has no register pointer: every write sends all five control
//! bytes and every read returns all five status bytes. The driver keeps a
//! caller-owned [`Registers`] mirror in sync with whatever went over the bus.
//!
//! Tuning uses high-side injection with the 32.768 kHz reference:
//! `N = 4 * (f_rf + f_if) / f_ref`.

use crate::config::{TEA5767_IF_HZ, TEA5767_XTAL_HZ};
use crate::drivers::tuner::Tuner;
use crate::hal::i2c::{I2cAddress, I2cBus};
use crate::types::Frequency;
use embedded_hal_async::i2c::I2c;

/// Number of bytes in a TEA5767 transfer
pub const REGISTER_COUNT: usize = 5;

/// Register bit definitions
mod reg {
    // Write byte 1
    pub const MUTE: u8 = 0x80;
    pub const PLL_HIGH: u8 = 0x3F;

    // Write byte 3
    pub const SUD: u8 = 0x80;
    pub const SSL_MID: u8 = 0x20;
    pub const HLSI: u8 = 0x10;

    // Write byte 4
    pub const XTAL: u8 = 0x10;
    pub const SMUTE: u8 = 0x08;

    // Read byte 1
    pub const READY: u8 = 0x80;
    pub const BAND_LIMIT: u8 = 0x40;

    // Read byte 3
    pub const STEREO: u8 = 0x80;
    pub const IF_COUNTER: u8 = 0x7F;

    // Read byte 4
    pub const LEVEL_SHIFT: u8 = 4;
}

/// Local mirror of the five TEA5767 registers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registers([u8; REGISTER_COUNT]);

impl Registers {
    /// Power-on configuration: search up, mid stop level, high-side
    /// injection, 32.768 kHz crystal, soft mute
    pub const DEFAULT: Self = Self([
        0x00,
        0x00,
        reg::SUD | reg::SSL_MID | reg::HLSI,
        reg::XTAL | reg::SMUTE,
        0x00,
    ]);

    /// Wrap raw register bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; REGISTER_COUNT]) -> Self {
        Self(bytes)
    }

    /// Raw register bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; REGISTER_COUNT] {
        &self.0
    }

    /// 14-bit PLL word held in bytes 1 and 2
    #[must_use]
    pub const fn pll(&self) -> u16 {
        (((self.0[0] & reg::PLL_HIGH) as u16) << 8) | self.0[1] as u16
    }

    /// Store a PLL word, keeping the mute and search bits of byte 1
    pub fn set_pll(&mut self, pll: u16) {
        let [high, low] = pll.to_be_bytes();
        self.0[0] = (self.0[0] & !reg::PLL_HIGH) | (high & reg::PLL_HIGH);
        self.0[1] = low;
    }

    /// Whether the mute bit is set
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.0[0] & reg::MUTE != 0
    }

    /// Ready flag of a status read (station found or tuning finished)
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.0[0] & reg::READY != 0
    }

    /// Band-limit flag of a status read
    #[must_use]
    pub const fn band_limit_reached(&self) -> bool {
        self.0[0] & reg::BAND_LIMIT != 0
    }

    /// Stereo indicator of a status read
    #[must_use]
    pub const fn is_stereo(&self) -> bool {
        self.0[2] & reg::STEREO != 0
    }

    /// IF counter of a status read
    #[must_use]
    pub const fn if_counter(&self) -> u8 {
        self.0[2] & reg::IF_COUNTER
    }

    /// ADC signal level of a status read (0-15)
    #[must_use]
    pub const fn signal_level(&self) -> u8 {
        self.0[3] >> reg::LEVEL_SHIFT
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Registers {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{:02X}", self.0);
    }
}

/// PLL word for a frequency, rounded to the nearest step
#[must_use]
pub const fn pll_for(freq: Frequency) -> u16 {
    let numerator = 4 * (freq.as_hz() as u64 + TEA5767_IF_HZ as u64);
    let xtal = TEA5767_XTAL_HZ as u64;
    ((numerator + xtal / 2) / xtal) as u16
}

/// Tuned frequency in Hz for a PLL word
#[must_use]
pub const fn hz_for_pll(pll: u16) -> u32 {
    (pll as u32 * (TEA5767_XTAL_HZ / 4)).saturating_sub(TEA5767_IF_HZ)
}

/// TEA5767 driver error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Bus transfer failed
    I2c(E),
    /// The chip reports a frequency outside the FM band (Hz)
    OutOfBand(u32),
}

#[cfg(feature = "embedded")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::I2c(e) => defmt::write!(f, "I2C({})", e),
            Self::OutOfBand(hz) => defmt::write!(f, "OutOfBand({} Hz)", hz),
        }
    }
}

/// TEA5767 operation result
pub type TunerResult<T, E> = Result<T, Error<E>>;

/// TEA5767 driver
pub struct Tea5767<I> {
    bus: I2cBus<I>,
}

impl<I: I2c> Tea5767<I> {
    /// Create a new TEA5767 driver
    #[must_use]
    pub fn new(i2c: I) -> Self {
        Self {
            bus: I2cBus::new(i2c),
        }
    }

    /// Give the underlying bus back
    pub fn release(self) -> I {
        self.bus.release()
    }

    async fn write_registers(&mut self, registers: &Registers) -> TunerResult<(), I::Error> {
        self.bus
            .write(I2cAddress::TEA5767, registers.as_bytes())
            .await
            .map_err(Error::I2c)
    }

    async fn read_registers(&mut self, registers: &mut Registers) -> TunerResult<(), I::Error> {
        let mut buf = [0u8; REGISTER_COUNT];
        self.bus
            .read(I2cAddress::TEA5767, &mut buf)
            .await
            .map_err(Error::I2c)?;
        *registers = Registers::from_bytes(buf);
        Ok(())
    }
}

impl<I: I2c> Tuner for Tea5767<I> {
    type Error = Error<I::Error>;

    const ADDRESS: I2cAddress = I2cAddress::TEA5767;

    async fn is_device_ready(&mut self) -> bool {
        self.bus.probe(I2cAddress::TEA5767).await
    }

    async fn init(&mut self, registers: &mut Registers) -> Result<(), Self::Error> {
        *registers = Registers::DEFAULT;
        self.write_registers(registers).await
    }

    async fn set_frequency(
        &mut self,
        registers: &mut Registers,
        freq: Frequency,
    ) -> Result<(), Self::Error> {
        registers.set_pll(pll_for(freq));
        self.write_registers(registers).await
    }

    async fn get_frequency(&mut self, registers: &mut Registers) -> Result<Frequency, Self::Error> {
        self.read_registers(registers).await?;
        let hz = hz_for_pll(registers.pll());
        Frequency::from_hz(hz).ok_or(Error::OutOfBand(hz))
    }
}
