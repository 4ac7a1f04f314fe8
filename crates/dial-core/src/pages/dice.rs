// src/pages/dice.rs
//! Dice roller: a die face drawn with pips inside a tappable disc.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::chrome::{add_frame, add_return_icon};
use super::constants::*;
use super::page::Page;
use crate::toys::DiceSnapshot;
use crate::ui::core::{Action, PageEvent, PageId, TouchPoint};
use crate::ui::region::{Region, first_hit};
use crate::ui::styling::{COLOR_PANEL, WHITE};
use crate::ui::widgets::{Paint, TextSize, Widget, WidgetId, WidgetRegistry};

const ROLL_RADIUS: u16 = 70;

const DICE_REGIONS: [(Region, Action); 2] = [
    (RETURN_REGION, Action::NavigateToPage(PageId::Extra)),
    (Region::circle(120, 120, ROLL_RADIUS), Action::RollDice),
];

const PIP_SPACING: i32 = 22;
const PIP_DIAMETER: u32 = 14;

/// Pip offsets from the die center: TL, TR, ML, C, MR, BL, BR.
const PIPS: [(i32, i32); 7] = [
    (-1, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (1, 1),
];

/// Which pips are lit for faces 1..=6, one bit per entry of [`PIPS`].
const FACE_MASKS: [u8; 6] = [
    0b000_1000,
    0b100_0001,
    0b100_1001,
    0b110_0011,
    0b110_1011,
    0b111_0111,
];

fn face_mask(face: u8) -> u8 {
    FACE_MASKS[(face.clamp(1, 6) - 1) as usize]
}

pub struct DicePage {
    widgets: WidgetRegistry,
    pips: [WidgetId; 7],
    hint: WidgetId,
    dirty: bool,
}

impl DicePage {
    pub fn new() -> Self {
        let mut widgets = WidgetRegistry::new();
        add_frame(&mut widgets);

        let center = Point::new(120, 120);
        widgets.add(Widget::circle(center, ROLL_RADIUS as u32 * 2).with_stroke(Paint::outline(), 2));
        widgets.add(
            Widget::rounded_rect(Rectangle::with_center(center, Size::new(76, 76)), 12)
                .with_fill(Paint::fixed(COLOR_PANEL))
                .with_stroke(Paint::text(), 3),
        );
        let pips = PIPS.map(|(dx, dy)| {
            widgets.add(
                Widget::circle(
                    center + Point::new(dx * PIP_SPACING, dy * PIP_SPACING),
                    PIP_DIAMETER,
                )
                .with_fill(Paint::fixed(WHITE)),
            )
        });
        let hint = widgets.add(Widget::label("Tap to roll", Point::new(120, 30), TextSize::Small));

        add_return_icon(&mut widgets);

        let mut page = Self {
            widgets,
            pips,
            hint,
            dirty: true,
        };
        page.show(&DiceSnapshot {
            face: 1,
            rolling: false,
        });
        page
    }

    fn show(&mut self, snapshot: &DiceSnapshot) -> bool {
        let mask = face_mask(snapshot.face);
        let mut changed = false;
        for (bit, pip) in self.pips.iter().enumerate() {
            changed |= self.widgets.set_visible(*pip, mask & (1 << bit) != 0);
        }
        let hint = if snapshot.rolling { "Rolling..." } else { "Tap to roll" };
        changed |= self.widgets.set_text(self.hint, hint);
        changed
    }
}

impl Default for DicePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for DicePage {
    fn id(&self) -> PageId {
        PageId::Dice
    }

    fn title(&self) -> &str {
        "Dice"
    }

    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        first_hit(&DICE_REGIONS, point)
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        let changed = match event {
            PageEvent::Dice(snapshot) => self.show(snapshot),
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
