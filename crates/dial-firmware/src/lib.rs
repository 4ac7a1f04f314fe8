//! ESP32-S3 firmware-specific modules for dial
//!
//! This crate contains the code that cannot compile on desktop targets: the
//! board wiring of esp-hal peripherals onto the core's capability traits and
//! the SD card settings store.

#![no_std]

pub mod board;
pub mod sd_store;
