//! Color definitions and the user-selectable palette
//!
//! Colors are RGB565, the native format of the round panel.
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

/// Convert a `0xRRGGBB` literal into RGB565.
pub const fn rgb(hex: u32) -> Rgb565 {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

// ============================================================================
// Base Colors
// ============================================================================

/// Page background - near black with a blue tint
pub const COLOR_BACKGROUND: Rgb565 = rgb(0x05070A);

/// Fill behind boxed text (seconds box, calculator display)
pub const COLOR_PANEL: Rgb565 = rgb(0x000000);

/// Arrow glyphs on the timer and set pages
pub const COLOR_ARROW: Rgb565 = rgb(0xFF0000);

/// Inactive or disabled elements
pub const COLOR_MUTED: Rgb565 = rgb(0x808080);

/// Neutral label text that never follows the theme
pub const WHITE: Rgb565 = rgb(0xFFFFFF);

// ============================================================================
// Palette
// ============================================================================

/// Number of entries in [`PALETTE`].
pub const PALETTE_LEN: usize = 12;

/// The fixed, ordered palette both theme colors index into.
pub const PALETTE: [Rgb565; PALETTE_LEN] = [
    rgb(0xFF0000), // red
    rgb(0xFF4500), // orange red
    rgb(0xFF8C00), // orange
    rgb(0xFFD700), // gold
    rgb(0xFFFF00), // yellow
    rgb(0x00FF00), // green
    rgb(0x00FFFF), // cyan
    rgb(0x0000FF), // blue
    rgb(0x8B00FF), // violet
    rgb(0xFF00FF), // magenta
    rgb(0xFF1493), // deep pink
    rgb(0xFFFFFF), // white
];

/// Short names shown under the settings swatches.
pub const PALETTE_NAMES: [&str; PALETTE_LEN] = [
    "Red", "OrRed", "Orange", "Gold", "Yellow", "Green", "Cyan", "Blue", "Violet", "Magenta",
    "Pink", "White",
];

/// Palette entry for an index, wrapping out-of-range values.
pub fn palette_color(index: usize) -> Rgb565 {
    PALETTE[index % PALETTE_LEN]
}

/// The two theme colors resolved from palette indices.
///
/// This is what gets broadcast to every page when the theme changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub text: Rgb565,
    pub outline: Rgb565,
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn test_rgb_conversion_extremes() {
        assert_eq!(rgb(0xFFFFFF), Rgb565::WHITE);
        assert_eq!(rgb(0x000000), Rgb565::BLACK);
        assert_eq!(rgb(0xFF0000), Rgb565::RED);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(PALETTE_LEN + 2), PALETTE[2]);
    }
}
