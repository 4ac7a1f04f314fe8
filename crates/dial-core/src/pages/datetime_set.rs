// src/pages/datetime_set.rs
//! Date and time editor reached from settings.
//!
//! The arrows edit a staged copy; nothing reaches the clock until Save.
//! Cancel and the return icon both discard the edit.

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use super::chrome::{add_frame, add_return_icon};
use super::constants::*;
use super::page::Page;
use crate::datetime::{DateField, PendingDateTimeEdit};
use crate::ui::core::{Action, DateTimeCommand, PageEvent, PageId, Step, TouchPoint};
use crate::ui::region::{Region, first_hit};
use crate::ui::styling::{COLOR_ARROW, COLOR_MUTED};
use crate::ui::widgets::{Paint, TextSize, Widget, WidgetId, WidgetRegistry};

const COLUMN_LEFT: u16 = 30;
const COLUMN_WIDTH: u16 = 36;

const UP_TOP: u16 = 50;
const UP_BOTTOM: u16 = 90;
const DOWN_TOP: u16 = 130;
const DOWN_BOTTOM: u16 = 170;

const BUTTON_TOP: u16 = 180;
// Stops short of the return icon row so the two never overlap.
const BUTTON_BOTTOM: u16 = RETURN_TOP_Y;
const CANCEL_BUTTON: Region = Region::rect(40, BUTTON_TOP, 115, BUTTON_BOTTOM);
const SAVE_BUTTON: Region = Region::rect(125, BUTTON_TOP, 200, BUTTON_BOTTOM);

const HEADINGS: [&str; 5] = ["Yr", "Mo", "Dy", "Hr", "Mn"];

const fn column_region(index: usize, top: u16, bottom: u16) -> Region {
    let left = COLUMN_LEFT + index as u16 * COLUMN_WIDTH;
    Region::rect(left, top, left + COLUMN_WIDTH, bottom)
}

const fn adjust(index: usize, step: Step) -> Action {
    Action::DateTime(DateTimeCommand::Adjust(DateField::ALL[index], step))
}

const DATETIME_REGIONS: [(Region, Action); 13] = [
    (column_region(0, UP_TOP, UP_BOTTOM), adjust(0, Step::Up)),
    (column_region(1, UP_TOP, UP_BOTTOM), adjust(1, Step::Up)),
    (column_region(2, UP_TOP, UP_BOTTOM), adjust(2, Step::Up)),
    (column_region(3, UP_TOP, UP_BOTTOM), adjust(3, Step::Up)),
    (column_region(4, UP_TOP, UP_BOTTOM), adjust(4, Step::Up)),
    (column_region(0, DOWN_TOP, DOWN_BOTTOM), adjust(0, Step::Down)),
    (column_region(1, DOWN_TOP, DOWN_BOTTOM), adjust(1, Step::Down)),
    (column_region(2, DOWN_TOP, DOWN_BOTTOM), adjust(2, Step::Down)),
    (column_region(3, DOWN_TOP, DOWN_BOTTOM), adjust(3, Step::Down)),
    (column_region(4, DOWN_TOP, DOWN_BOTTOM), adjust(4, Step::Down)),
    (CANCEL_BUTTON, Action::DateTime(DateTimeCommand::Cancel)),
    (SAVE_BUTTON, Action::DateTime(DateTimeCommand::Save)),
    (RETURN_REGION, Action::NavigateToPage(PageId::Settings)),
];

fn column_center(index: usize) -> i32 {
    (COLUMN_LEFT + index as u16 * COLUMN_WIDTH + COLUMN_WIDTH / 2) as i32
}

fn button_bounds(left: i32, right: i32) -> Rectangle {
    Rectangle::new(
        Point::new(left, BUTTON_TOP as i32),
        Size::new((right - left) as u32, (BUTTON_BOTTOM - BUTTON_TOP) as u32 - 2),
    )
}

pub struct DateTimeSetPage {
    widgets: WidgetRegistry,
    values: [WidgetId; 5],
    dirty: bool,
}

impl DateTimeSetPage {
    pub fn new() -> Self {
        let mut widgets = WidgetRegistry::new();
        add_frame(&mut widgets);
        widgets.add(Widget::label("Set date & time", Point::new(120, 24), TextSize::Small));

        let values = core::array::from_fn(|i| {
            let x = column_center(i);
            widgets.add(
                Widget::label(HEADINGS[i], Point::new(x, 42), TextSize::Small)
                    .with_fill(Paint::fixed(COLOR_MUTED)),
            );
            for (glyph, y) in [("^", 70), ("v", 150)] {
                widgets.add(
                    Widget::label(glyph, Point::new(x, y), TextSize::Medium)
                        .with_fill(Paint::fixed(COLOR_ARROW)),
                );
            }
            widgets.add(Widget::label("--", Point::new(x, 110), TextSize::Small).with_scale(2))
        });

        for (label, left, right) in [("Cancel", 40, 115), ("Save", 125, 200)] {
            let bounds = button_bounds(left, right);
            widgets.add(Widget::rounded_rect(bounds, 6).with_stroke(Paint::outline(), 2));
            widgets.add(Widget::label(label, bounds.center(), TextSize::Small));
        }

        add_return_icon(&mut widgets);

        Self {
            widgets,
            values,
            dirty: true,
        }
    }

    fn show(&mut self, edit: &PendingDateTimeEdit) -> bool {
        let mut changed = false;
        for (id, field) in self.values.iter().zip(DateField::ALL) {
            let mut text: String<6> = String::new();
            match field {
                // Two digits fit the column; the century is fixed.
                DateField::Year => write!(text, "{:02}", edit.field(field) % 100).ok(),
                _ => write!(text, "{:02}", edit.field(field)).ok(),
            };
            changed |= self.widgets.set_text(*id, &text);
        }
        changed
    }
}

impl Default for DateTimeSetPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for DateTimeSetPage {
    fn id(&self) -> PageId {
        PageId::DateTimeSet
    }

    fn title(&self) -> &str {
        "Set date"
    }

    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        first_hit(&DATETIME_REGIONS, point)
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        let changed = match event {
            PageEvent::DateTimeEdit(edit) => self.show(edit),
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

    fn tap(page: &mut DateTimeSetPage, x: u16, y: u16) -> Option<Action> {
        page.handle_touch(TouchPoint::new(x, y))
    }

    #[test]
    fn test_column_arrows() {
        let mut page = DateTimeSetPage::new();
        assert_eq!(
            tap(&mut page, 40, 60),
            Some(Action::DateTime(DateTimeCommand::Adjust(
                DateField::Year,
                Step::Up
            )))
        );
        assert_eq!(
            tap(&mut page, 200, 160),
            Some(Action::DateTime(DateTimeCommand::Adjust(
                DateField::Minute,
                Step::Down
            )))
        );
        assert_eq!(tap(&mut page, 20, 60), None, "left of the first column");
        assert_eq!(tap(&mut page, 120, 110), None, "value row is inert");
    }

    #[test]
    fn test_buttons_and_return_icon() {
        let mut page = DateTimeSetPage::new();
        assert_eq!(
            tap(&mut page, 100, 190),
            Some(Action::DateTime(DateTimeCommand::Cancel))
        );
        assert_eq!(
            tap(&mut page, 140, 190),
            Some(Action::DateTime(DateTimeCommand::Save))
        );
        assert_eq!(
            tap(&mut page, 120, 225),
            Some(Action::NavigateToPage(PageId::Settings))
        );
    }

    #[test]
    fn test_return_icon_never_saves() {
        let mut page = DateTimeSetPage::new();
        for x in [95, 110, 120, 135, 145] {
            for y in [204, 210, 220] {
                assert_eq!(
                    tap(&mut page, x, y),
                    Some(Action::NavigateToPage(PageId::Settings)),
                    "return icon at ({}, {}) discards the edit",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_edit_event_retexts_columns() {
        let mut page = DateTimeSetPage::new();
        let edit = PendingDateTimeEdit::from(DateTime::new(2026, 10, 16, 7, 5, 0));
        assert!(page.on_event(&PageEvent::DateTimeEdit(edit)));
        let texts: heapless::Vec<&str, 5> = page
            .values
            .iter()
            .filter_map(|id| page.widgets.get(*id).text())
            .collect();
        assert_eq!(texts.as_slice(), &["26", "10", "16", "07", "05"]);
    }
}
