//! Page furniture shared by several pages.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::constants::*;
use super::page::screen_bounds;
use crate::ui::widgets::{Paint, TextSize, Widget, WidgetId, WidgetRegistry};

/// Ring around the dial in the outline color.
pub fn add_frame(widgets: &mut WidgetRegistry) -> WidgetId {
    widgets.add(Widget::rect(screen_bounds()).with_stroke(Paint::outline(), FRAME_STROKE_WIDTH_PX))
}

/// Return icon at the bottom of the dial.
pub fn add_return_icon(widgets: &mut WidgetRegistry) {
    let bounds = Rectangle::new(
        Point::new(RETURN_ICON_X_PX, RETURN_ICON_Y_PX),
        Size::new(RETURN_ICON_WIDTH_PX, RETURN_ICON_HEIGHT_PX),
    );
    widgets.add(Widget::rounded_rect(bounds, 6).with_stroke(Paint::outline(), 2));
    widgets.add(Widget::label("<", bounds.center(), TextSize::Medium));
}

/// Large two-digit group with an outline halo.
pub fn add_digits(widgets: &mut WidgetRegistry, text: &str, center_x: i32) -> WidgetId {
    widgets.add(
        Widget::label(text, Point::new(center_x, DIGITS_Y_PX), TextSize::Medium)
            .with_scale(DIGIT_SCALE)
            .with_stroke(Paint::outline(), DIGIT_HALO_PX),
    )
}
