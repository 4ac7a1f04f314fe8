// src/pages/settings.rs
//! Settings page: text color, outline color and brightness columns, each
//! with an up and a down arrow, plus the button into the date/time editor.

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use super::chrome::{add_frame, add_return_icon};
use super::constants::*;
use super::page::Page;
use crate::theme::Theme;
use crate::ui::core::{Action, PageEvent, PageId, Step, ThemeCommand, TouchPoint};
use crate::ui::region::{Region, first_hit};
use crate::ui::styling::{COLOR_ARROW, PALETTE_NAMES, WHITE, palette_color};
use crate::ui::widgets::{Paint, TextSize, Widget, WidgetId, WidgetRegistry};

const UP_TOP: u16 = 60;
const UP_BOTTOM: u16 = 120;
const DOWN_TOP: u16 = 140;
const DOWN_BOTTOM: u16 = 200;

/// Column edges: text color, outline color, brightness.
const COLUMN_EDGES: [u16; 4] = [20, 87, 153, 220];

const fn column(index: usize, top: u16, bottom: u16) -> Region {
    Region::rect(COLUMN_EDGES[index], top, COLUMN_EDGES[index + 1], bottom)
}

const SETTINGS_REGIONS: [(Region, Action); 8] = [
    (RETURN_REGION, Action::NavigateToPage(PageId::Clock)),
    (
        Region::rect(60, 20, 180, 56),
        Action::NavigateToPage(PageId::DateTimeSet),
    ),
    (
        column(0, UP_TOP, UP_BOTTOM),
        Action::Theme(ThemeCommand::CycleText(Step::Up)),
    ),
    (
        column(1, UP_TOP, UP_BOTTOM),
        Action::Theme(ThemeCommand::CycleOutline(Step::Up)),
    ),
    (
        column(2, UP_TOP, UP_BOTTOM),
        Action::Theme(ThemeCommand::Brightness(Step::Up)),
    ),
    (
        column(0, DOWN_TOP, DOWN_BOTTOM),
        Action::Theme(ThemeCommand::CycleText(Step::Down)),
    ),
    (
        column(1, DOWN_TOP, DOWN_BOTTOM),
        Action::Theme(ThemeCommand::CycleOutline(Step::Down)),
    ),
    (
        column(2, DOWN_TOP, DOWN_BOTTOM),
        Action::Theme(ThemeCommand::Brightness(Step::Down)),
    ),
];

fn column_center(index: usize) -> i32 {
    (COLUMN_EDGES[index] as i32 + COLUMN_EDGES[index + 1] as i32) / 2
}

pub struct SettingsPage {
    widgets: WidgetRegistry,
    text_swatch: WidgetId,
    outline_swatch: WidgetId,
    text_name: WidgetId,
    outline_name: WidgetId,
    brightness: WidgetId,
    dirty: bool,
}

impl SettingsPage {
    pub fn new() -> Self {
        let mut widgets = WidgetRegistry::new();
        add_frame(&mut widgets);

        let button = Rectangle::new(Point::new(60, 20), Size::new(120, 36));
        widgets.add(Widget::rounded_rect(button, 8).with_stroke(Paint::outline(), 2));
        widgets.add(Widget::label("Set date", button.center(), TextSize::Medium));

        for (index, heading) in ["Text", "Line", "Light"].into_iter().enumerate() {
            let x = column_center(index);
            widgets.add(
                Widget::label(heading, Point::new(x, 66), TextSize::Small)
                    .with_fill(Paint::fixed(WHITE)),
            );
            for (glyph, y) in [("^", 92), ("v", 172)] {
                widgets.add(
                    Widget::label(glyph, Point::new(x, y), TextSize::Medium)
                        .with_scale(ARROW_SCALE)
                        .with_fill(Paint::fixed(COLOR_ARROW)),
                );
            }
        }

        let swatch = |index: usize| {
            let bounds = Rectangle::new(Point::new(column_center(index) - 15, 114), Size::new(30, 14));
            Widget::rect(bounds)
                .with_fill(Paint::fixed(palette_color(0)))
                .with_stroke(Paint::outline(), 1)
        };
        let text_swatch = widgets.add(swatch(0));
        let outline_swatch = widgets.add(swatch(1));

        let name = |index: usize| {
            Widget::label("", Point::new(column_center(index), 136), TextSize::Small)
                .with_fill(Paint::fixed(WHITE))
        };
        let text_name = widgets.add(name(0));
        let outline_name = widgets.add(name(1));
        let brightness = widgets.add(Widget::label(
            "",
            Point::new(column_center(2), 126),
            TextSize::Medium,
        ));

        add_return_icon(&mut widgets);

        let mut page = Self {
            widgets,
            text_swatch,
            outline_swatch,
            text_name,
            outline_name,
            brightness,
            dirty: true,
        };
        page.show(&Theme::default());
        page
    }

    fn show(&mut self, theme: &Theme) -> bool {
        let text = theme.text_index as usize;
        let outline = theme.outline_index as usize;

        let mut percent: String<8> = String::new();
        write!(percent, "{}%", (theme.brightness * 100.0) as u32).ok();

        let mut changed = self
            .widgets
            .get_mut(self.text_swatch)
            .set_fill_color(palette_color(text));
        changed |= self
            .widgets
            .get_mut(self.outline_swatch)
            .set_fill_color(palette_color(outline));
        changed |= self
            .widgets
            .set_text(self.text_name, PALETTE_NAMES[text % PALETTE_NAMES.len()]);
        changed |= self
            .widgets
            .set_text(self.outline_name, PALETTE_NAMES[outline % PALETTE_NAMES.len()]);
        changed |= self.widgets.set_text(self.brightness, &percent);
        changed
    }
}

impl Default for SettingsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for SettingsPage {
    fn id(&self) -> PageId {
        PageId::Settings
    }

    fn title(&self) -> &str {
        "Settings"
    }

    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        first_hit(&SETTINGS_REGIONS, point)
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        let changed = match event {
            PageEvent::Theme(theme) => self.show(theme),
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
