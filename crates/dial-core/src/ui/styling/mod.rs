//! Styling for the watch UI
//!
//! - [`colors`] - base colors and the 12-entry user palette

pub mod colors;

pub use colors::{
    COLOR_ARROW, COLOR_BACKGROUND, COLOR_MUTED, COLOR_PANEL, PALETTE, PALETTE_LEN, PALETTE_NAMES,
    ThemeColors, WHITE, palette_color, rgb,
};
