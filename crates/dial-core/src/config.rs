// src/config.rs
//! Compile-time tuning for the main loop and the persisted settings record.
//!
//! The device has no configuration surface; everything here is a constant.

use embassy_time::Duration;

/// Sleep lengths and cadences driving [`App::step`](crate::app::App::step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTimings {
    /// Sleep while the screen is on and the clock face is showing
    pub clock_frame: Duration,
    /// Sleep while any touch-driven page is showing
    pub interactive_frame: Duration,
    /// Sleep while the screen is blanked
    pub screen_off_frame: Duration,
    /// Inactivity after which the screen dims and returns to the clock
    pub idle_timeout: Duration,
    /// Fuel gauge polling interval while the screen is on
    pub battery_interval: Duration,
    /// Length of the dice and 8-ball animations
    pub toy_animation: Duration,
}

impl LoopTimings {
    pub const fn new() -> Self {
        Self {
            clock_frame: Duration::from_millis(50),
            interactive_frame: Duration::from_millis(1),
            screen_off_frame: Duration::from_millis(100),
            idle_timeout: Duration::from_secs(5),
            battery_interval: Duration::from_secs(30),
            toy_animation: Duration::from_millis(600),
        }
    }
}

impl Default for LoopTimings {
    fn default() -> Self {
        Self::new()
    }
}

/// Brightness below which the screen counts as dimmed (touch wakes it).
pub const DIM_THRESHOLD: f32 = 0.1;

/// Name of the single settings record on the durable medium.
pub const SETTINGS_RECORD_NAME: &str = "settings.bin";

/// Upper bound on the encoded settings record.
pub const SETTINGS_RECORD_MAX_LEN: usize = 32;
