//! Test doubles shared by the integration tests
//!
//! A scripted tuner, a fake TEA5767 on an `embedded-hal-async` bus,
//! a canvas that records draw calls, and a delay that only counts.

#![allow(dead_code)]

use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use fm_radio::drivers::display::Canvas;
use fm_radio::drivers::tea5767::{Registers, REGISTER_COUNT};
use fm_radio::drivers::tuner::Tuner;
use fm_radio::hal::i2c::I2cAddress;
use fm_radio::types::Frequency;

// =============================================================================
// Scripted Tuner
// =============================================================================

/// Tuner whose step results are fixed up front
pub struct ScriptedTuner {
    pub present: bool,
    pub init_ok: bool,
    pub set_ok: bool,
    pub readback: Option<Frequency>,
    /// Mirror contents reported by a successful read
    pub read_registers: Registers,
    /// Names of the steps called, in order
    pub calls: Vec<&'static str>,
    /// Frequencies passed to `set_frequency`
    pub tuned_to: Vec<Frequency>,
}

impl ScriptedTuner {
    /// Every step succeeds and the chip reports `freq`
    pub fn working(freq: Frequency) -> Self {
        Self {
            present: true,
            init_ok: true,
            set_ok: true,
            readback: Some(freq),
            read_registers: Registers::from_bytes([0xAD, 0x8D, 0x80 | 0x37, 0xA0, 0x00]),
            calls: Vec::new(),
            tuned_to: Vec::new(),
        }
    }

    /// No device on the bus
    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::working(fm_radio::config::FIX_STATION)
        }
    }
}

impl Tuner for ScriptedTuner {
    type Error = ();

    const ADDRESS: I2cAddress = I2cAddress::TEA5767;

    async fn is_device_ready(&mut self) -> bool {
        self.calls.push("probe");
        self.present
    }

    async fn init(&mut self, registers: &mut Registers) -> Result<(), ()> {
        self.calls.push("init");
        if self.init_ok {
            *registers = Registers::DEFAULT;
            Ok(())
        } else {
            Err(())
        }
    }

    async fn set_frequency(&mut self, _registers: &mut Registers, freq: Frequency) -> Result<(), ()> {
        self.calls.push("set");
        self.tuned_to.push(freq);
        if self.set_ok {
            Ok(())
        } else {
            Err(())
        }
    }

    async fn get_frequency(&mut self, registers: &mut Registers) -> Result<Frequency, ()> {
        self.calls.push("get");
        let freq = self.readback.ok_or(())?;
        *registers = self.read_registers;
        Ok(freq)
    }
}

// =============================================================================
// Fake TEA5767 Bus
// =============================================================================

/// I2C bus with a simulated TEA5767 at 0x60
pub struct FakeChipBus {
    pub present: bool,
    pub fail_writes: bool,
    /// Every write transfer, in order
    pub writes: Vec<Vec<u8>>,
    pub stereo: bool,
    pub if_counter: u8,
    pub level: u8,
    /// PLL word reported by reads; follows writes unless pinned
    pub pll: u16,
    pub pin_pll: bool,
}

impl FakeChipBus {
    pub fn new() -> Self {
        Self {
            present: true,
            fail_writes: false,
            writes: Vec::new(),
            stereo: true,
            if_counter: 0x37,
            level: 10,
            pll: 0,
            pin_pll: false,
        }
    }

    fn status_bytes(&self) -> [u8; REGISTER_COUNT] {
        let [high, low] = self.pll.to_be_bytes();
        [
            0x80 | (high & 0x3F),
            low,
            (if self.stereo { 0x80 } else { 0x00 }) | (self.if_counter & 0x7F),
            self.level << 4,
            0x00,
        ]
    }
}

impl ErrorType for FakeChipBus {
    type Error = ErrorKind;
}

impl I2c for FakeChipBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != 0x60 || !self.present {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if self.fail_writes {
                        return Err(ErrorKind::Other);
                    }
                    self.writes.push(bytes.to_vec());
                    if bytes.len() == REGISTER_COUNT && !self.pin_pll {
                        self.pll = (u16::from(bytes[0] & 0x3F) << 8) | u16::from(bytes[1]);
                    }
                }
                Operation::Read(buf) => {
                    let status = self.status_bytes();
                    for (dst, src) in buf.iter_mut().zip(status.iter()) {
                        *dst = *src;
                    }
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Recording Canvas
// =============================================================================

/// One draw call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp {
    Clear,
    Text { x: i32, y: i32, text: String },
}

/// Canvas that remembers what was drawn
#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    /// Text of every line drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Clear => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn draw_text_centered(&mut self, x: i32, y: i32, text: &str) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
        });
    }
}

// =============================================================================
// Counting Delay
// =============================================================================

/// Delay that returns at once and adds up the requested time
#[derive(Default)]
pub struct CountingDelay {
    pub elapsed_ns: u64,
}

impl CountingDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}
