// src/pages/calculator.rs
//! Calculator keypad. The return icon sits at the top of this page because
//! the keypad fills the lower half of the dial.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;

use super::chrome::add_frame;
use super::page::Page;
use crate::calculator::CalcKey;
use crate::ui::core::{Action, PageEvent, PageId, TouchPoint};
use crate::ui::region::{EDGE, Region, first_hit};
use crate::ui::styling::COLOR_PANEL;
use crate::ui::widgets::{Paint, TextSize, Widget, WidgetId, WidgetRegistry};

const RETURN_BOTTOM: u16 = 28;

const GRID_LEFT: u16 = 40;
const GRID_TOP: u16 = 60;
const KEY_SIZE: u16 = 40;
const GRID_RIGHT: u16 = GRID_LEFT + 4 * KEY_SIZE;
const GRID_BOTTOM: u16 = GRID_TOP + 4 * KEY_SIZE;

const DISPLAY_PANEL: Rectangle = Rectangle::new(Point::new(40, 28), Size::new(160, 30));

/// Key under a point inside the keypad.
fn key_at(point: TouchPoint) -> Option<CalcKey> {
    let grid = Region::rect(GRID_LEFT, GRID_TOP, GRID_RIGHT, GRID_BOTTOM);
    if !grid.contains(point) {
        return None;
    }
    let row = ((point.y - GRID_TOP) / KEY_SIZE) as usize;
    let col = ((point.x - GRID_LEFT) / KEY_SIZE) as usize;
    Some(CalcKey::GRID[row][col])
}

fn key_bounds(row: usize, col: usize) -> Rectangle {
    Rectangle::new(
        Point::new(
            GRID_LEFT as i32 + col as i32 * KEY_SIZE as i32 + 1,
            GRID_TOP as i32 + row as i32 * KEY_SIZE as i32 + 1,
        ),
        Size::new(KEY_SIZE as u32 - 2, KEY_SIZE as u32 - 2),
    )
}

pub struct CalculatorPage {
    widgets: WidgetRegistry,
    display: WidgetId,
    dirty: bool,
}

impl CalculatorPage {
    pub fn new() -> Self {
        let mut widgets = WidgetRegistry::new();
        add_frame(&mut widgets);

        widgets.add(Widget::label("<", Point::new(120, 16), TextSize::Medium));
        widgets.add(
            Widget::rect(DISPLAY_PANEL)
                .with_fill(Paint::fixed(COLOR_PANEL))
                .with_stroke(Paint::outline(), 2),
        );
        let display = widgets.add(
            Widget::label("0", DISPLAY_PANEL.center() + Point::new(74, 0), TextSize::Medium)
                .with_alignment(Alignment::Right),
        );

        for (row, keys) in CalcKey::GRID.iter().enumerate() {
            for (col, key) in keys.iter().enumerate() {
                let bounds = key_bounds(row, col);
                widgets.add(Widget::rounded_rect(bounds, 6).with_stroke(Paint::outline(), 1));
                widgets.add(Widget::label(key.label(), bounds.center(), TextSize::Medium));
            }
        }

        Self {
            widgets,
            display,
            dirty: true,
        }
    }
}

impl Default for CalculatorPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for CalculatorPage {
    fn id(&self) -> PageId {
        PageId::Calculator
    }

    fn title(&self) -> &str {
        "Calculator"
    }

    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        let back = [(
            Region::rect(0, 0, EDGE, RETURN_BOTTOM),
            Action::NavigateToPage(PageId::Extra),
        )];
        first_hit(&back, point).or_else(|| key_at(point).map(Action::Calculator))
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        let changed = match event {
            PageEvent::Calculator(text) => self.widgets.set_text(self.display, text),
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
