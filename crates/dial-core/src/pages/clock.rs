// src/pages/clock.rs
//! Clock face: `HH:MM` in large haloed digits, boxed seconds flanked by the
//! weekday and a battery bar, and the date along the bottom.
//!
//! The face doubles as the navigation hub. The top band opens the extra
//! page, the band below it opens the timer, the column through the middle
//! blanks the screen, and the two bottom corners open settings and the
//! calendar.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::chrome::{add_digits, add_frame};
use super::constants::*;
use super::page::Page;
use crate::battery::{BATTERY_FILL_MAX_PX, fill_height};
use crate::datetime::two_digits;
use crate::ui::core::{Action, PageEvent, PageId, TouchPoint};
use crate::ui::region::{EDGE, Region, first_hit};
use crate::ui::styling::COLOR_PANEL;
use crate::ui::widgets::{Paint, TextSize, Widget, WidgetId, WidgetRegistry};

const CLOCK_REGIONS: [(Region, Action); 5] = [
    (Region::rect(0, 0, EDGE, 40), Action::NavigateToPage(PageId::Extra)),
    (Region::rect(0, 40, EDGE, 80), Action::NavigateToPage(PageId::Timer)),
    (Region::rect(101, 80, 140, 201), Action::ScreenOff),
    (Region::rect(121, 201, EDGE, EDGE), Action::NavigateToPage(PageId::Settings)),
    (Region::rect(0, 201, 121, EDGE), Action::NavigateToPage(PageId::Calendar)),
];

// Battery outline; the fill sits 2 px inside it.
const BATTERY_X_PX: i32 = 198;
const BATTERY_Y_PX: i32 = 147;
const BATTERY_WIDTH_PX: u32 = 12;
const BATTERY_HEIGHT_PX: u32 = 30;

const SECONDS_BOX: Rectangle = Rectangle::new(Point::new(89, 138), Size::new(64, 48));

pub struct ClockPage {
    widgets: WidgetRegistry,
    hours: WidgetId,
    minutes: WidgetId,
    seconds: WidgetId,
    weekday: WidgetId,
    date: WidgetId,
    battery_fill: WidgetId,
    dirty: bool,
}

impl ClockPage {
    pub fn new() -> Self {
        let mut widgets = WidgetRegistry::new();
        add_frame(&mut widgets);

        let hours = add_digits(&mut widgets, "00", DIGITS_LEFT_X_PX);
        add_digits(&mut widgets, ":", DIGITS_COLON_X_PX);
        let minutes = add_digits(&mut widgets, "00", DIGITS_RIGHT_X_PX);

        widgets.add(
            Widget::rect(SECONDS_BOX)
                .with_fill(Paint::fixed(COLOR_PANEL))
                .with_stroke(Paint::outline(), 2),
        );
        let seconds = widgets.add(
            Widget::label("00", SECONDS_BOX.center(), TextSize::Medium).with_scale(2),
        );

        let weekday = widgets.add(Widget::label("---", Point::new(52, 162), TextSize::Medium));
        let date = widgets.add(Widget::label("--/--", Point::new(120, 216), TextSize::Medium));

        let outline = Rectangle::new(
            Point::new(BATTERY_X_PX, BATTERY_Y_PX),
            Size::new(BATTERY_WIDTH_PX, BATTERY_HEIGHT_PX),
        );
        widgets.add(Widget::rect(outline).with_stroke(Paint::text(), 1));
        widgets.add(
            Widget::rect(Rectangle::new(
                Point::new(BATTERY_X_PX + 3, BATTERY_Y_PX - 2),
                Size::new(6, 2),
            ))
            .with_fill(Paint::text()),
        );
        let battery_fill =
            widgets.add(Widget::rect(battery_fill_bounds(0)).with_fill(Paint::text()));

        Self {
            widgets,
            hours,
            minutes,
            seconds,
            weekday,
            date,
            battery_fill,
            dirty: true,
        }
    }
}

impl Default for ClockPage {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill rectangle for a battery level, growing upwards from the bottom.
fn battery_fill_bounds(level: u8) -> Rectangle {
    let height = fill_height(level).min(BATTERY_FILL_MAX_PX);
    let bottom = BATTERY_Y_PX + BATTERY_HEIGHT_PX as i32 - 2;
    Rectangle::new(
        Point::new(BATTERY_X_PX + 2, bottom - height as i32),
        Size::new(BATTERY_WIDTH_PX - 4, height),
    )
}

impl Page for ClockPage {
    fn id(&self) -> PageId {
        PageId::Clock
    }

    fn title(&self) -> &str {
        "Clock"
    }

    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        first_hit(&CLOCK_REGIONS, point)
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        let changed = match event {
            PageEvent::Clock(now) => {
                let mut changed = self.widgets.set_text(self.hours, &two_digits(now.hour));
                changed |= self.widgets.set_text(self.minutes, &two_digits(now.minute));
                changed |= self.widgets.set_text(self.seconds, &two_digits(now.second));
                changed |= self.widgets.set_text(self.weekday, now.weekday_name());
                changed |= self.widgets.set_text(self.date, &now.date_label());
                changed
            }
            PageEvent::Battery(level) => self
                .widgets
                .get_mut(self.battery_fill)
                .set_bounds(battery_fill_bounds(*level)),
            _ => false,
        };
        self.dirty |= changed;
        changed
    }

    fn widgets(&self) -> &WidgetRegistry {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.widgets
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::DateTime;

    fn tap(page: &mut ClockPage, x: u16, y: u16) -> Option<Action> {
        page.handle_touch(TouchPoint::new(x, y))
    }

    #[test]
    fn test_navigation_regions() {
        let mut page = ClockPage::new();
        assert_eq!(tap(&mut page, 120, 10), Some(Action::NavigateToPage(PageId::Extra)));
        assert_eq!(tap(&mut page, 120, 60), Some(Action::NavigateToPage(PageId::Timer)));
        assert_eq!(tap(&mut page, 120, 150), Some(Action::ScreenOff));
        assert_eq!(
            tap(&mut page, 180, 220),
            Some(Action::NavigateToPage(PageId::Settings))
        );
        assert_eq!(
            tap(&mut page, 60, 220),
            Some(Action::NavigateToPage(PageId::Calendar))
        );
    }

    #[test]
    fn test_region_edges() {
        let mut page = ClockPage::new();
        assert_eq!(tap(&mut page, 100, 150), None, "x must exceed 100");
        assert_eq!(tap(&mut page, 140, 150), None, "x must stay below 140");
        assert_eq!(tap(&mut page, 120, 200), Some(Action::ScreenOff), "y 200 inclusive");
        assert_eq!(
            tap(&mut page, 120, 201),
            Some(Action::NavigateToPage(PageId::Calendar)),
            "x 120 belongs to the calendar corner"
        );
        assert_eq!(
            tap(&mut page, 121, 201),
            Some(Action::NavigateToPage(PageId::Settings))
        );
        assert_eq!(tap(&mut page, 30, 150), None, "empty face is a no-op");
    }

    #[test]
    fn test_clock_event_retexts_digits() {
        let mut page = ClockPage::new();
        page.mark_clean();
        let now = DateTime::new(2024, 1, 1, 9, 5, 7);
        assert!(page.on_event(&PageEvent::Clock(now)));
        assert!(page.is_dirty());
        assert_eq!(page.widgets.get(page.hours).text(), Some("09"));
        assert_eq!(page.widgets.get(page.minutes).text(), Some("05"));
        assert_eq!(page.widgets.get(page.seconds).text(), Some("07"));
        assert_eq!(page.widgets.get(page.weekday).text(), Some("Mon"));
        assert_eq!(page.widgets.get(page.date).text(), Some("01/01"));

        page.mark_clean();
        assert!(!page.on_event(&PageEvent::Clock(now)), "same reading, no redraw");
    }

    #[test]
    fn test_battery_fill_grows_upwards() {
        let full = battery_fill_bounds(100);
        let empty = battery_fill_bounds(0);
        assert_eq!(full.size.height, 26);
        assert_eq!(empty.size.height, 1);
        assert_eq!(
            full.bottom_right().map(|p| p.y),
            empty.bottom_right().map(|p| p.y),
            "both fills share the same bottom edge"
        );
    }
}
