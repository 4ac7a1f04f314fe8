// src/pages/timer.rs
//! Timer page: `MM:SS` with arrows for manual entry, a start/stop band
//! over the digits and a mode row for count-down, count-up and reset.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::chrome::{add_digits, add_frame, add_return_icon};
use super::constants::*;
use super::page::Page;
use crate::datetime::two_digits;
use crate::timer::{TimerDirection, TimerSnapshot};
use crate::ui::core::{Action, PageEvent, PageId, Step, TimerCommand, TouchPoint};
use crate::ui::region::{EDGE, Region, first_hit};
use crate::ui::styling::{COLOR_ARROW, WHITE};
use crate::ui::widgets::{Paint, TextSize, Widget, WidgetId, WidgetRegistry};

const MODE_ROW_TOP: u16 = 172;
const MODE_ROW_BOTTOM: u16 = 204;

const TIMER_REGIONS: [(Region, Action); 9] = [
    (RETURN_REGION, Action::NavigateToPage(PageId::Clock)),
    (
        Region::rect(30, MODE_ROW_TOP, 90, MODE_ROW_BOTTOM),
        Action::Timer(TimerCommand::SelectCountDown),
    ),
    (
        Region::rect(90, MODE_ROW_TOP, 150, MODE_ROW_BOTTOM),
        Action::Timer(TimerCommand::SelectCountUp),
    ),
    (
        Region::rect(150, MODE_ROW_TOP, 210, MODE_ROW_BOTTOM),
        Action::Timer(TimerCommand::Reset),
    ),
    (Region::rect(0, 40, EDGE, 136), Action::Timer(TimerCommand::ToggleRun)),
    (
        Region::rect(0, 0, 120, 40),
        Action::Timer(TimerCommand::AdjustMinutes(Step::Up)),
    ),
    (
        Region::rect(120, 0, EDGE, 40),
        Action::Timer(TimerCommand::AdjustSeconds(Step::Up)),
    ),
    (
        Region::rect(0, 136, 120, MODE_ROW_TOP),
        Action::Timer(TimerCommand::AdjustMinutes(Step::Down)),
    ),
    (
        Region::rect(120, 136, EDGE, MODE_ROW_TOP),
        Action::Timer(TimerCommand::AdjustSeconds(Step::Down)),
    ),
];

/// Horizontal centers of the three mode buttons.
const MODE_CENTERS_X: [i32; 3] = [60, 120, 180];

pub struct TimerPage {
    widgets: WidgetRegistry,
    minutes: WidgetId,
    seconds: WidgetId,
    arrows: [WidgetId; 4],
    mode_marker: WidgetId,
    running: bool,
    dirty: bool,
}

impl TimerPage {
    pub fn new() -> Self {
        let mut widgets = WidgetRegistry::new();
        add_frame(&mut widgets);

        let minutes = add_digits(&mut widgets, "00", DIGITS_LEFT_X_PX);
        add_digits(&mut widgets, ":", DIGITS_COLON_X_PX);
        let seconds = add_digits(&mut widgets, "00", DIGITS_RIGHT_X_PX);

        let arrow = |glyph: &str, x: i32, y: i32| {
            Widget::label(glyph, Point::new(x, y), TextSize::Medium)
                .with_scale(ARROW_SCALE)
                .with_fill(Paint::fixed(COLOR_ARROW))
        };
        let arrows = [
            widgets.add(arrow("^", DIGITS_LEFT_X_PX, 24)),
            widgets.add(arrow("^", DIGITS_RIGHT_X_PX, 24)),
            widgets.add(arrow("v", DIGITS_LEFT_X_PX, 152)),
            widgets.add(arrow("v", DIGITS_RIGHT_X_PX, 152)),
        ];

        for (label, x) in ["DOWN", "UP", "RESET"].into_iter().zip(MODE_CENTERS_X) {
            widgets.add(
                Widget::label(label, Point::new(x, 186), TextSize::Small)
                    .with_fill(Paint::fixed(WHITE)),
            );
        }
        let mode_marker = widgets.add(
            Widget::rect(mode_marker_bounds(TimerDirection::CountDown)).with_fill(Paint::outline()),
        );

        add_return_icon(&mut widgets);

        Self {
            widgets,
            minutes,
            seconds,
            arrows,
            mode_marker,
            running: false,
            dirty: true,
        }
    }

    fn show(&mut self, snapshot: &TimerSnapshot) -> bool {
        let mut changed = self
            .widgets
            .set_text(self.minutes, &two_digits(snapshot.minutes));
        changed |= self
            .widgets
            .set_text(self.seconds, &two_digits(snapshot.seconds));
        for arrow in self.arrows {
            changed |= self.widgets.set_visible(arrow, !snapshot.running);
        }
        changed |= self
            .widgets
            .get_mut(self.mode_marker)
            .set_bounds(mode_marker_bounds(snapshot.direction));
        self.running = snapshot.running;
        changed
    }
}

impl Default for TimerPage {
    fn default() -> Self {
        Self::new()
    }
}

/// Underline beneath the active direction button.
fn mode_marker_bounds(direction: TimerDirection) -> Rectangle {
    let center = match direction {
        TimerDirection::CountDown => MODE_CENTERS_X[0],
        TimerDirection::CountUp => MODE_CENTERS_X[1],
    };
    Rectangle::new(Point::new(center - 16, 196), Size::new(32, 2))
}

impl Page for TimerPage {
    fn id(&self) -> PageId {
        PageId::Timer
    }

    fn title(&self) -> &str {
        "Timer"
    }

    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        let action = first_hit(&TIMER_REGIONS, point)?;
        let is_arrow = matches!(
            action,
            Action::Timer(TimerCommand::AdjustMinutes(_) | TimerCommand::AdjustSeconds(_))
        );
        if is_arrow && self.running {
            return None;
        }
        Some(action)
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        let changed = match event {
            PageEvent::Timer(snapshot) => self.show(snapshot),
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

    fn tap(page: &mut TimerPage, x: u16, y: u16) -> Option<Action> {
        page.handle_touch(TouchPoint::new(x, y))
    }

    fn snapshot(running: bool) -> TimerSnapshot {
        TimerSnapshot {
            minutes: 2,
            seconds: 30,
            running,
            direction: TimerDirection::CountUp,
        }
    }

    #[test]
    fn test_regions_in_priority_order() {
        let mut page = TimerPage::new();
        assert_eq!(tap(&mut page, 120, 220), Some(Action::NavigateToPage(PageId::Clock)));
        assert_eq!(
            tap(&mut page, 40, 190),
            Some(Action::Timer(TimerCommand::SelectCountDown))
        );
        assert_eq!(
            tap(&mut page, 120, 190),
            Some(Action::Timer(TimerCommand::SelectCountUp))
        );
        assert_eq!(tap(&mut page, 200, 190), Some(Action::Timer(TimerCommand::Reset)));
        assert_eq!(tap(&mut page, 120, 90), Some(Action::Timer(TimerCommand::ToggleRun)));
        assert_eq!(
            tap(&mut page, 60, 20),
            Some(Action::Timer(TimerCommand::AdjustMinutes(Step::Up)))
        );
        assert_eq!(
            tap(&mut page, 180, 150),
            Some(Action::Timer(TimerCommand::AdjustSeconds(Step::Down)))
        );
        assert_eq!(tap(&mut page, 10, 220), None, "outside the return icon");
    }

    #[test]
    fn test_arrows_ignored_while_running() {
        let mut page = TimerPage::new();
        page.on_event(&PageEvent::Timer(snapshot(true)));
        assert_eq!(tap(&mut page, 60, 20), None);
        assert_eq!(
            tap(&mut page, 120, 90),
            Some(Action::Timer(TimerCommand::ToggleRun)),
            "toggle still works"
        );
        assert!(!page.widgets.get(page.arrows[0]).is_visible(), "arrows hidden");
    }

    #[test]
    fn test_snapshot_retexts_and_moves_marker() {
        let mut page = TimerPage::new();
        page.mark_clean();
        assert!(page.on_event(&PageEvent::Timer(snapshot(false))));
        assert_eq!(page.widgets.get(page.minutes).text(), Some("02"));
        assert_eq!(page.widgets.get(page.seconds).text(), Some("30"));
        assert!(page.is_dirty());
    }
}
