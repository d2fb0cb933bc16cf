//! I2C Bus Abstractions
//!
//! Provides async I2C communication for peripherals like the TEA5767 and display.
//! Generic over `embedded-hal-async`, so the same code drives the embassy-stm32
//! DMA driver on target and a fake bus in host tests.

use embedded_hal_async::i2c::I2c;

/// I2C operation result
pub type I2cResult<T, E> = Result<T, E>;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// TEA5767 FM receiver address
    pub const TEA5767: Self = Self(crate::config::TEA5767_I2C_ADDR);

    /// SSD1306 OLED display address
    pub const SSD1306: Self = Self(crate::config::DISPLAY_I2C_ADDR);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// I2C bus wrapper for shared access
pub struct I2cBus<I> {
    i2c: I,
}

impl<I: I2c> I2cBus<I> {
    /// First address probed by [`I2cBus::scan`]
    const SCAN_FIRST: u8 = 0x08;

    /// One past the last address probed by [`I2cBus::scan`]
    const SCAN_END: u8 = 0x78;

    /// Create a new I2C bus wrapper
    #[must_use]
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Give the underlying driver back
    pub fn release(self) -> I {
        self.i2c
    }

    /// Write bytes to a device
    pub async fn write(&mut self, addr: I2cAddress, data: &[u8]) -> I2cResult<(), I::Error> {
        self.i2c.write(addr.addr(), data).await
    }

    /// Read bytes from a device
    pub async fn read(&mut self, addr: I2cAddress, buffer: &mut [u8]) -> I2cResult<(), I::Error> {
        self.i2c.read(addr.addr(), buffer).await
    }

    /// Check whether a device acknowledges its address
    pub async fn probe(&mut self, addr: I2cAddress) -> bool {
        let mut buf = [0u8; 1];
        self.i2c.read(addr.addr(), &mut buf).await.is_ok()
    }

    /// Scan the I2C bus for devices
    pub async fn scan(&mut self) -> heapless::Vec<I2cAddress, 16> {
        let mut devices = heapless::Vec::new();

        for addr in Self::SCAN_FIRST..Self::SCAN_END {
            let addr = I2cAddress::new(addr);
            if self.probe(addr).await && devices.push(addr).is_err() {
                break;
            }
        }

        devices
    }
}
