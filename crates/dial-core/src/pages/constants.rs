//! Shared layout constants for page furniture
//!
//! These are used by several pages and keep the frame ring and the return
//! icon in the same place everywhere.

use crate::ui::region::{EDGE, Region};

/// Stroke of the ring drawn around the edge of every page
pub const FRAME_STROKE_WIDTH_PX: u32 = 4;

/// Halo thickness around the large clock and timer digits
pub const DIGIT_HALO_PX: u32 = 3;

/// Integer scale of the large digits (FONT_10X20 base)
pub const DIGIT_SCALE: u32 = 4;

/// Integer scale of arrow glyphs
pub const ARROW_SCALE: u32 = 2;

/// Top edge of the return icon's touch area
pub const RETURN_TOP_Y: u16 = 204;

/// Return icon at the bottom of the dial
pub const RETURN_REGION: Region = Region::rect(90, RETURN_TOP_Y, 150, EDGE);

/// Return icon drawn inside [`RETURN_REGION`]
pub const RETURN_ICON_X_PX: i32 = 96;
pub const RETURN_ICON_Y_PX: i32 = 208;
pub const RETURN_ICON_WIDTH_PX: u32 = 48;
pub const RETURN_ICON_HEIGHT_PX: u32 = 22;

/// Horizontal centers of the large `MM:SS` / `HH:MM` digit groups
pub const DIGITS_LEFT_X_PX: i32 = 60;
pub const DIGITS_COLON_X_PX: i32 = 120;
pub const DIGITS_RIGHT_X_PX: i32 = 180;
pub const DIGITS_Y_PX: i32 = 88;
