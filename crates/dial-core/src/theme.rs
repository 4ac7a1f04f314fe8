// src/theme.rs
//! The color theme: two palette indices plus the configured brightness.
//!
//! This is the only durable state on the watch. It is loaded once at boot
//! through [`storage::load_theme`](crate::storage::load_theme) and written
//! back after every change.

use serde::{Deserialize, Serialize};

use crate::ui::core::{Step, ThemeCommand};
use crate::ui::styling::{PALETTE_LEN, ThemeColors, palette_color};

/// Orange.
pub const DEFAULT_TEXT_INDEX: usize = 2;
/// Green.
pub const DEFAULT_OUTLINE_INDEX: usize = 5;
pub const DEFAULT_BRIGHTNESS: f32 = 0.25;

pub const MIN_BRIGHTNESS: f32 = 0.25;
pub const MAX_BRIGHTNESS: f32 = 1.0;
pub const BRIGHTNESS_STEP: f32 = 0.25;

/// Persisted theme record.
///
/// Field order is the wire order of the postcard encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub text_index: u8,
    pub outline_index: u8,
    pub brightness: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_index: DEFAULT_TEXT_INDEX as u8,
            outline_index: DEFAULT_OUTLINE_INDEX as u8,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl Theme {
    /// Whether a decoded record is usable as-is.
    pub fn is_valid(&self) -> bool {
        (self.text_index as usize) < PALETTE_LEN
            && (self.outline_index as usize) < PALETTE_LEN
            && self.brightness.is_finite()
            && (MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&self.brightness)
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors {
            text: palette_color(self.text_index as usize),
            outline: palette_color(self.outline_index as usize),
        }
    }

    pub fn cycle_text(&mut self, step: Step) {
        self.text_index = wrap_index(self.text_index, step);
    }

    pub fn cycle_outline(&mut self, step: Step) {
        self.outline_index = wrap_index(self.outline_index, step);
    }

    /// Move brightness one step, clamped to the allowed range.
    pub fn step_brightness(&mut self, step: Step) {
        let next = self.brightness + step.delta() as f32 * BRIGHTNESS_STEP;
        self.brightness = next.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS);
    }

    /// Apply a settings command. Returns `true` if the theme changed.
    pub fn apply(&mut self, command: ThemeCommand) -> bool {
        let before = *self;
        match command {
            ThemeCommand::CycleText(step) => self.cycle_text(step),
            ThemeCommand::CycleOutline(step) => self.cycle_outline(step),
            ThemeCommand::Brightness(step) => self.step_brightness(step),
        }
        *self != before
    }
}

fn wrap_index(index: u8, step: Step) -> u8 {
    (index as i32 + step.delta()).rem_euclid(PALETTE_LEN as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::PALETTE;

    #[test]
    fn test_defaults_are_orange_on_green() {
        let theme = Theme::default();
        assert_eq!(theme.colors().text, PALETTE[2], "default text is orange");
        assert_eq!(theme.colors().outline, PALETTE[5], "default outline is green");
        assert_eq!(theme.brightness, 0.25);
        assert!(theme.is_valid());
    }

    #[test]
    fn test_cycle_wraps_both_directions() {
        let mut theme = Theme {
            text_index: 11,
            outline_index: 0,
            brightness: 0.5,
        };
        theme.cycle_text(Step::Up);
        theme.cycle_outline(Step::Down);
        assert_eq!(theme.text_index, 0, "text index wraps 11 -> 0");
        assert_eq!(theme.outline_index, 11, "outline index wraps 0 -> 11");
    }

    #[test]
    fn test_brightness_clamps() {
        let mut theme = Theme::default();
        assert!(!theme.apply(ThemeCommand::Brightness(Step::Down)), "already at minimum");
        assert_eq!(theme.brightness, 0.25);

        for _ in 0..6 {
            theme.apply(ThemeCommand::Brightness(Step::Up));
        }
        assert_eq!(theme.brightness, 1.0, "clamped at maximum");
        assert!(theme.apply(ThemeCommand::Brightness(Step::Down)));
        assert_eq!(theme.brightness, 0.75);
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let bad_index = Theme {
            text_index: 12,
            ..Theme::default()
        };
        let bad_brightness = Theme {
            brightness: 0.0,
            ..Theme::default()
        };
        let nan = Theme {
            brightness: f32::NAN,
            ..Theme::default()
        };
        assert!(!bad_index.is_valid());
        assert!(!bad_brightness.is_valid());
        assert!(!nan.is_valid());
    }
}
