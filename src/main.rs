//! FM Radio Status Firmware
//!
//! Entry point for the TEA5767 status application.
//! Initializes hardware, spawns the producer and display tasks, then runs
//! the event loop until back is short-pressed.

#![no_std]
#![no_main]

use defmt::{debug, info};
use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Pull;
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use {defmt_rtt as _, panic_probe as _};

use fm_radio::app::event_loop::{run, AppEvent, DisplayCommand};
use fm_radio::drivers::display::Display;
use fm_radio::drivers::tea5767::Tea5767;
use fm_radio::hal::gpio::BackButton;
use fm_radio::hal::i2c::I2cBus;
use fm_radio::prelude::*;
use fm_radio::tasks::{
    button_task, display_task, tick_task, APP_STATE, BUTTON_STOP, DISPLAY_CMD, EVENT_QUEUE,
    TICK_STOP,
};

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    I2C1_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C1>;
    I2C3_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C3>;
    I2C3_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C3>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("FM Radio Firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // I2C1 for the OLED: PA9 = SCL, PA10 = SDA
    let display_i2c = I2c::new(
        p.I2C1,
        p.PA9,  // SCL
        p.PA10, // SDA
        Irqs,
        p.DMA1_CH1,
        p.DMA1_CH2,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );

    // I2C3 on the external header: PC0 = SCL (pin16), PC1 = SDA (pin15)
    let tuner_i2c = I2c::new(
        p.I2C3,
        p.PC0, // SCL
        p.PC1, // SDA
        Irqs,
        p.DMA1_CH3,
        p.DMA1_CH4,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );

    info!("I2C1 and I2C3 initialized at {} Hz", I2C_FREQUENCY_HZ);

    let mut tuner_bus = I2cBus::new(tuner_i2c);
    for addr in tuner_bus.scan().await {
        debug!("Header bus device at {}", addr);
    }
    let mut tuner = Tea5767::new(tuner_bus.release());

    let back = BackButton::new(ExtiInput::new(p.PC13, p.EXTI13, Pull::Up));

    // Spawned display, input, timer; stopped timer, display, input
    spawner.spawn(display_task(Display::new(display_i2c))).unwrap();
    spawner.spawn(button_task(back)).unwrap();
    spawner.spawn(tick_task()).unwrap();

    info!("Tasks spawned, entering event loop");
    DISPLAY_CMD.signal(DisplayCommand::Redraw);

    let exit = run(
        EVENT_QUEUE.receiver(),
        &APP_STATE,
        &mut tuner,
        FIX_STATION,
        &DISPLAY_CMD,
        |event, handled| match event {
            AppEvent::Tick => {
                if let Some(outcome) = handled.update {
                    match outcome.failed {
                        None => debug!("Tuned: {}", outcome.status),
                        Some(step) => debug!("Status {} (stopped at {})", outcome.status, step),
                    }
                }
            }
            AppEvent::Key(input) => debug!("Key event: {}", input),
        },
    )
    .await;

    TICK_STOP.signal(());
    DISPLAY_CMD.signal(DisplayCommand::Shutdown);
    BUTTON_STOP.signal(());

    info!("Radio app exited with code {}", exit.code());

    // Park; the stopped tasks finish their teardown on their own
    core::future::pending::<()>().await;
}
