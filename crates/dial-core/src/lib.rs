//! Hardware-independent core library for the dial watch
//!
//! This crate contains all platform-agnostic logic for the round touchscreen
//! watch: the page system and renderer, touch dispatch, the main loop body,
//! the timer, calendar and calculator engines, theme persistence and the
//! capability traits a board implements.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets (ESP32-S3) and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod app;
pub mod app_state;
pub mod async_i2c_bus;
pub mod battery;
pub mod calculator;
pub mod calendar;
pub mod config;
pub mod datetime;
pub mod dispatcher;
pub mod drivers;
pub mod framebuffer;
pub mod hal;
pub mod pages;
pub mod storage;
pub mod theme;
pub mod timer;
pub mod toys;
pub mod ui;
