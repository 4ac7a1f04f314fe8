// src/ui/mod.rs
//! Dial UI system: retained widgets for a 240×240 round panel
//!
//! This module provides:
//! - Core types for touches, page identifiers, actions and page events
//! - Spatial hit regions evaluated in a fixed priority order
//! - A retained widget registry whose paints follow the color theme
//! - The fixed palette and base colors

pub mod core;
pub mod region;
pub mod styling;
pub mod widgets;

pub use core::{
    Action, CalendarCommand, DateTimeCommand, PageEvent, PageId, Step, ThemeCommand, TimerCommand,
    TouchPoint,
};
pub use region::{EDGE, Region, first_hit};
pub use styling::{ThemeColors, palette_color};
pub use widgets::{ColorRole, Paint, TextSize, Widget, WidgetId, WidgetKind, WidgetRegistry};

/// Panel width in pixels.
pub const DISPLAY_WIDTH_PX: u32 = 240;

/// Panel height in pixels.
pub const DISPLAY_HEIGHT_PX: u32 = 240;

/// Center of the round panel.
pub const DISPLAY_CENTER_PX: (i32, i32) = (120, 120);
