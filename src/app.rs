//! Radio Status Application
//!
//! The event loop, the status updater and the screen renderer. Everything
//! here is generic over the mutex flavour, the tuner and the canvas, so it
//! runs unchanged on target and in host tests.

pub mod event_loop;
pub mod input;
pub mod render;
pub mod state;
pub mod status;
