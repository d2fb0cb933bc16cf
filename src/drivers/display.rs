//! OLED Display Driver
//!
//! Frame buffer plus the SSD1306 controller on I2C. Status screens draw
//! through the [`Canvas`] trait, which the frame buffer implements with
//! embedded-graphics; [`Display::flush`] then pushes the buffer page by page.

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::hal::i2c::{I2cAddress, I2cBus, I2cResult};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_hal_async::i2c::I2c;

/// Bytes per page row (one byte covers 8 vertical pixels)
const PAGE_WIDTH: usize = DISPLAY_WIDTH as usize;

/// Number of 8-pixel pages
const PAGE_COUNT: usize = (DISPLAY_HEIGHT / 8) as usize;

/// Frame buffer size (1 bit per pixel)
const BUFFER_SIZE: usize = PAGE_WIDTH * PAGE_COUNT;

/// SSD1306 control bytes and commands
mod cmd {
    /// Control byte: the rest of the transfer is commands
    pub const CONTROL_COMMAND: u8 = 0x00;
    /// Control byte: the rest of the transfer is GDDRAM data
    pub const CONTROL_DATA: u8 = 0x40;

    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const MEMORY_MODE: u8 = 0x20;
    pub const COLUMN_ADDR: u8 = 0x21;
    pub const PAGE_ADDR: u8 = 0x22;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SEG_REMAP: u8 = 0xA0;
    pub const CHARGE_PUMP: u8 = 0x8D;
}

/// Power-up sequence for a 128x64 panel with the internal charge pump,
/// sent as one command transfer
const INIT_SEQUENCE: [u8; 26] = [
    cmd::CONTROL_COMMAND,
    cmd::DISPLAY_OFF,
    cmd::SET_DISPLAY_CLOCK_DIV,
    0x80,
    cmd::SET_MULTIPLEX,
    (DISPLAY_HEIGHT - 1) as u8,
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::CHARGE_PUMP,
    0x14,
    cmd::MEMORY_MODE,
    0x00, // horizontal addressing
    cmd::SEG_REMAP | 0x01,
    cmd::COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::DISPLAY_ALL_ON_RESUME,
    cmd::NORMAL_DISPLAY,
    cmd::DISPLAY_ON,
];

/// Address window covering the whole panel
const FULL_WINDOW: [u8; 7] = [
    cmd::CONTROL_COMMAND,
    cmd::COLUMN_ADDR,
    0,
    (PAGE_WIDTH - 1) as u8,
    cmd::PAGE_ADDR,
    0,
    (PAGE_COUNT - 1) as u8,
];

/// Text surface handed to screen renderers
pub trait Canvas {
    /// Blank the whole surface
    fn clear(&mut self);

    /// Draw one line of text centered on `(x, y)`
    fn draw_text_centered(&mut self, x: i32, y: i32, text: &str);
}

/// Monochrome frame buffer in SSD1306 page layout
pub struct DisplayBuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl DisplayBuffer {
    /// Create a blank buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// Byte index and bit mask of a pixel, if it is on the panel
    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        let x = usize::try_from(x).ok().filter(|&x| x < PAGE_WIDTH)?;
        let y = usize::try_from(y).ok().filter(|&y| y < PAGE_COUNT * 8)?;
        Some(((y / 8) * PAGE_WIDTH + x, 1 << (y % 8)))
    }

    /// Blank the buffer
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Set or reset one pixel; off-panel coordinates are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return;
        };
        self.write_pixel(x, y, on);
    }

    fn write_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((idx, mask)) = Self::locate(x, y) {
            if on {
                self.buffer[idx] |= mask;
            } else {
                self.buffer[idx] &= !mask;
            }
        }
    }

    /// Read one pixel back
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return false;
        };
        Self::locate(x, y).is_some_and(|(idx, mask)| self.buffer[idx] & mask != 0)
    }

    /// Raw buffer, page by page
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// One page row of the buffer
    fn page(&self, page: usize) -> &[u8] {
        &self.buffer[page * PAGE_WIDTH..(page + 1) * PAGE_WIDTH]
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTarget for DisplayBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.write_pixel(coord.x, coord.y, color.is_on());
        }
        Ok(())
    }
}

impl OriginDimensions for DisplayBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl Canvas for DisplayBuffer {
    fn clear(&mut self) {
        self.buffer.fill(0);
    }

    fn draw_text_centered(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let layout = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        let _ = Text::with_text_style(text, Point::new(x, y), style, layout).draw(self);
    }
}

/// SSD1306 OLED driver owning its frame buffer
pub struct Display<I> {
    bus: I2cBus<I>,
    buffer: DisplayBuffer,
}

impl<I: I2c> Display<I> {
    /// Create a new display driver
    #[must_use]
    pub fn new(i2c: I) -> Self {
        Self {
            bus: I2cBus::new(i2c),
            buffer: DisplayBuffer::new(),
        }
    }

    /// Give the underlying bus back
    pub fn release(self) -> I {
        self.bus.release()
    }

    /// Power the panel up and show a blank frame
    pub async fn init(&mut self) -> I2cResult<(), I::Error> {
        self.bus.write(I2cAddress::SSD1306, &INIT_SEQUENCE).await?;
        self.buffer.clear();
        self.flush().await
    }

    /// Push the whole frame buffer to the panel
    pub async fn flush(&mut self) -> I2cResult<(), I::Error> {
        self.bus.write(I2cAddress::SSD1306, &FULL_WINDOW).await?;

        let mut transfer = [0u8; PAGE_WIDTH + 1];
        transfer[0] = cmd::CONTROL_DATA;
        for page in 0..PAGE_COUNT {
            transfer[1..].copy_from_slice(self.buffer.page(page));
            self.bus.write(I2cAddress::SSD1306, &transfer).await?;
        }

        Ok(())
    }

    /// Frame buffer to draw into before the next [`Display::flush`]
    #[must_use]
    pub fn buffer_mut(&mut self) -> &mut DisplayBuffer {
        &mut self.buffer
    }

    /// Blank the frame buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Turn the panel off; the controller keeps its RAM
    pub async fn power_off(&mut self) -> I2cResult<(), I::Error> {
        self.bus
            .write(I2cAddress::SSD1306, &[cmd::CONTROL_COMMAND, cmd::DISPLAY_OFF])
            .await
    }
}
