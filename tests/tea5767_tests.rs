//! TEA5767 Driver Tests
//!
//! Tests for the register mirror, PLL math and bus transfers
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test tea5767_tests

mod common;

use common::FakeChipBus;
use embassy_futures::block_on;
use embedded_hal::i2c::ErrorKind;

use fm_radio::config::FIX_STATION;
use fm_radio::drivers::tea5767::{hz_for_pll, pll_for, Error, Registers, Tea5767};
use fm_radio::drivers::tuner::Tuner;
use fm_radio::hal::i2c::{I2cAddress, I2cBus};
use fm_radio::types::Frequency;

// =============================================================================
// Register Mirror Tests
// =============================================================================

#[test]
fn test_default_registers() {
    assert_eq!(Registers::DEFAULT.as_bytes(), &[0x00, 0x00, 0xB0, 0x18, 0x00]);
    assert_eq!(Registers::default(), Registers::DEFAULT);
    assert!(!Registers::DEFAULT.is_muted());
    assert_eq!(Registers::DEFAULT.pll(), 0);
}

#[test]
fn test_set_pll_roundtrip() {
    let mut regs = Registers::DEFAULT;
    regs.set_pll(11_661);
    assert_eq!(regs.pll(), 11_661);
    assert_eq!(regs.as_bytes()[0], 0x2D);
    assert_eq!(regs.as_bytes()[1], 0x8D);
}

#[test]
fn test_set_pll_keeps_mute_bit() {
    let mut regs = Registers::from_bytes([0x80, 0x00, 0xB0, 0x18, 0x00]);
    regs.set_pll(0x3FFF);
    assert!(regs.is_muted());
    assert_eq!(regs.pll(), 0x3FFF);
    assert_eq!(regs.as_bytes()[2..], [0xB0, 0x18, 0x00]);
}

#[test]
fn test_set_pll_masks_to_14_bits() {
    let mut regs = Registers::DEFAULT;
    regs.set_pll(0xFFFF);
    assert!(!regs.is_muted());
    assert_eq!(regs.pll(), 0x3FFF);
}

#[test]
fn test_status_accessors() {
    let regs = Registers::from_bytes([0xED, 0x8D, 0xB7, 0xA0, 0x00]);
    assert!(regs.is_ready());
    assert!(regs.band_limit_reached());
    assert!(regs.is_stereo());
    assert_eq!(regs.if_counter(), 0x37);
    assert_eq!(regs.signal_level(), 10);
    assert_eq!(regs.pll(), 11_661);

    let quiet = Registers::from_bytes([0x2D, 0x8D, 0x37, 0x00, 0x00]);
    assert!(!quiet.is_ready());
    assert!(!quiet.band_limit_reached());
    assert!(!quiet.is_stereo());
    assert_eq!(quiet.signal_level(), 0);
}

// =============================================================================
// PLL Math Tests
// =============================================================================

#[test]
fn test_pll_for_fixed_station() {
    assert_eq!(pll_for(FIX_STATION), 11_661);
}

#[test]
fn test_hz_for_pll() {
    assert_eq!(hz_for_pll(11_661), 95_301_912);
    assert_eq!(hz_for_pll(0), 0);
}

#[test]
fn test_every_band_step_roundtrips() {
    for units in Frequency::MIN_UNITS..=Frequency::MAX_UNITS {
        let freq = Frequency::from_units(units).unwrap();
        let back = Frequency::from_hz(hz_for_pll(pll_for(freq)));
        assert_eq!(back, Some(freq), "{} did not read back", freq);
    }
}

#[test]
fn test_pll_fits_register() {
    let top = Frequency::from_units(Frequency::MAX_UNITS).unwrap();
    assert!(pll_for(top) <= 0x3FFF);
}

// =============================================================================
// Bus Tests
// =============================================================================

#[test]
fn test_probe_present_and_absent() {
    let mut tuner = Tea5767::new(FakeChipBus::new());
    assert!(block_on(tuner.is_device_ready()));

    let mut bus = FakeChipBus::new();
    bus.present = false;
    let mut tuner = Tea5767::new(bus);
    assert!(!block_on(tuner.is_device_ready()));
}

#[test]
fn test_scan_finds_only_tuner() {
    let mut bus = I2cBus::new(FakeChipBus::new());
    let found = block_on(bus.scan());
    assert_eq!(found.as_slice(), &[I2cAddress::TEA5767]);
}

#[test]
fn test_init_writes_defaults() {
    let mut tuner = Tea5767::new(FakeChipBus::new());
    let mut regs = Registers::from_bytes([0xFF; 5]);

    block_on(tuner.init(&mut regs)).unwrap();

    assert_eq!(regs, Registers::DEFAULT);
    let bus = tuner.release();
    assert_eq!(bus.writes, vec![vec![0x00, 0x00, 0xB0, 0x18, 0x00]]);
}

#[test]
fn test_set_frequency_writes_pll() {
    let mut tuner = Tea5767::new(FakeChipBus::new());
    let mut regs = Registers::DEFAULT;

    block_on(tuner.set_frequency(&mut regs, FIX_STATION)).unwrap();

    assert_eq!(regs.pll(), 11_661);
    let bus = tuner.release();
    assert_eq!(bus.writes, vec![vec![0x2D, 0x8D, 0xB0, 0x18, 0x00]]);
}

#[test]
fn test_get_frequency_reads_back_station() {
    let mut tuner = Tea5767::new(FakeChipBus::new());
    let mut regs = Registers::DEFAULT;

    block_on(tuner.init(&mut regs)).unwrap();
    block_on(tuner.set_frequency(&mut regs, FIX_STATION)).unwrap();
    let freq = block_on(tuner.get_frequency(&mut regs)).unwrap();

    assert_eq!(freq, FIX_STATION);
    // Mirror now holds the status bytes, not the control bytes
    assert_eq!(regs.as_bytes(), &[0xAD, 0x8D, 0xB7, 0xA0, 0x00]);
    assert!(regs.is_ready());
    assert!(regs.is_stereo());
}

#[test]
fn test_write_failure_is_bus_error() {
    let mut bus = FakeChipBus::new();
    bus.fail_writes = true;
    let mut tuner = Tea5767::new(bus);
    let mut regs = Registers::DEFAULT;

    assert_eq!(
        block_on(tuner.init(&mut regs)),
        Err(Error::I2c(ErrorKind::Other))
    );
}

#[test]
fn test_read_from_missing_chip_is_bus_error() {
    let mut bus = FakeChipBus::new();
    bus.present = false;
    let mut tuner = Tea5767::new(bus);
    let mut regs = Registers::DEFAULT;

    let err = block_on(tuner.get_frequency(&mut regs)).unwrap_err();
    assert!(matches!(err, Error::I2c(ErrorKind::NoAcknowledge(_))));
    assert_eq!(regs, Registers::DEFAULT);
}

#[test]
fn test_out_of_band_readback() {
    let mut bus = FakeChipBus::new();
    bus.pin_pll = true;
    let mut tuner = Tea5767::new(bus);
    let mut regs = Registers::DEFAULT;

    block_on(tuner.set_frequency(&mut regs, FIX_STATION)).unwrap();
    assert_eq!(
        block_on(tuner.get_frequency(&mut regs)),
        Err(Error::OutOfBand(0))
    );
}
