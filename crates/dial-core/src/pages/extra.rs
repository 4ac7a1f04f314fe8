// src/pages/extra.rs
//! Menu of the small utility pages.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::chrome::{add_frame, add_return_icon};
use super::constants::*;
use super::page::Page;
use crate::ui::core::{Action, PageId, TouchPoint};
use crate::ui::region::{Region, first_hit};
use crate::ui::widgets::{Paint, TextSize, Widget, WidgetRegistry};

const BUTTON_LEFT: u16 = 40;
const BUTTON_RIGHT: u16 = 200;

/// Menu entries, top to bottom: label, vertical band, destination.
const ENTRIES: [(&str, u16, u16, PageId); 3] = [
    ("Calculator", 40, 90, PageId::Calculator),
    ("Dice", 90, 140, PageId::Dice),
    ("8 Ball", 140, 190, PageId::EightBall),
];

const EXTRA_REGIONS: [(Region, Action); 4] = [
    (RETURN_REGION, Action::NavigateToPage(PageId::Clock)),
    entry_region(0),
    entry_region(1),
    entry_region(2),
];

const fn entry_region(index: usize) -> (Region, Action) {
    let (_, top, bottom, page) = ENTRIES[index];
    (
        Region::rect(BUTTON_LEFT, top, BUTTON_RIGHT, bottom),
        Action::NavigateToPage(page),
    )
}

pub struct ExtraPage {
    widgets: WidgetRegistry,
    dirty: bool,
}

impl ExtraPage {
    pub fn new() -> Self {
        let mut widgets = WidgetRegistry::new();
        add_frame(&mut widgets);

        for (label, top, bottom, _) in ENTRIES {
            let bounds = Rectangle::new(
                Point::new(BUTTON_LEFT as i32, top as i32 + 3),
                Size::new(
                    (BUTTON_RIGHT - BUTTON_LEFT) as u32,
                    (bottom - top) as u32 - 6,
                ),
            );
            widgets.add(Widget::rounded_rect(bounds, 10).with_stroke(Paint::outline(), 2));
            widgets.add(Widget::label(label, bounds.center(), TextSize::Medium));
        }

        add_return_icon(&mut widgets);

        Self {
            widgets,
            dirty: true,
        }
    }
}

impl Default for ExtraPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for ExtraPage {
    fn id(&self) -> PageId {
        PageId::Extra
    }

    fn title(&self) -> &str {
        "Extra"
    }

    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        first_hit(&EXTRA_REGIONS, point)
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

    #[test]
    fn test_menu_regions() {
        let mut page = ExtraPage::new();
        let cases = [
            (120, 60, Some(Action::NavigateToPage(PageId::Calculator))),
            (120, 100, Some(Action::NavigateToPage(PageId::Dice))),
            (120, 189, Some(Action::NavigateToPage(PageId::EightBall))),
            (120, 220, Some(Action::NavigateToPage(PageId::Clock))),
            (30, 100, None),
            (120, 195, None),
        ];
        for (x, y, expected) in cases {
            assert_eq!(
                page.handle_touch(TouchPoint::new(x, y)),
                expected,
                "tap at ({}, {})",
                x,
                y
            );
        }
    }
}
