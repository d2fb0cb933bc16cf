//! Build script for FM radio firmware
//!
//! Handles:
//! - Linker scripts for the Cortex-M binary (`link.x`, `defmt.x`)
//! - Re-run triggers

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host test builds (`--features std`) never link the firmware binary
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    // memory.x is generated by embassy-stm32's `memory-x` feature
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
