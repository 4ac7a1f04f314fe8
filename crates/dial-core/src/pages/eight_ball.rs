// src/pages/eight_ball.rs
//! Magic 8-ball: tap the ball, wait for the shake, read the answer.

use embedded_graphics::prelude::*;

use super::chrome::{add_frame, add_return_icon};
use super::constants::*;
use super::page::Page;
use crate::toys::EightBallSnapshot;
use crate::ui::core::{Action, PageEvent, PageId, TouchPoint};
use crate::ui::region::{Region, first_hit};
use crate::ui::styling::{COLOR_PANEL, WHITE};
use crate::ui::widgets::{Paint, TextSize, Widget, WidgetId, WidgetRegistry};

const BALL_RADIUS: u16 = 80;

const EIGHT_BALL_REGIONS: [(Region, Action); 2] = [
    (RETURN_REGION, Action::NavigateToPage(PageId::Extra)),
    (Region::circle(120, 120, BALL_RADIUS), Action::ShakeEightBall),
];

pub struct EightBallPage {
    widgets: WidgetRegistry,
    answer: WidgetId,
    dirty: bool,
}

impl EightBallPage {
    pub fn new() -> Self {
        let mut widgets = WidgetRegistry::new();
        add_frame(&mut widgets);

        let center = Point::new(120, 120);
        widgets.add(
            Widget::circle(center, BALL_RADIUS as u32 * 2)
                .with_fill(Paint::fixed(COLOR_PANEL))
                .with_stroke(Paint::outline(), 3),
        );
        widgets.add(Widget::circle(center, 124).with_stroke(Paint::text(), 1));
        let answer = widgets.add(
            Widget::label("", center, TextSize::Small).with_fill(Paint::fixed(WHITE)),
        );

        add_return_icon(&mut widgets);

        let mut page = Self {
            widgets,
            answer,
            dirty: true,
        };
        page.show(&EightBallSnapshot {
            answer: None,
            shaking: false,
        });
        page
    }

    fn show(&mut self, snapshot: &EightBallSnapshot) -> bool {
        self.widgets.set_text(self.answer, snapshot.text())
    }
}

impl Default for EightBallPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for EightBallPage {
    fn id(&self) -> PageId {
        PageId::EightBall
    }

    fn title(&self) -> &str {
        "8 Ball"
    }

    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        first_hit(&EIGHT_BALL_REGIONS, point)
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        let changed = match event {
            PageEvent::EightBall(snapshot) => self.show(snapshot),
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

    #[test]
    fn test_ball_region() {
        let mut page = EightBallPage::new();
        assert_eq!(
            page.handle_touch(TouchPoint::new(190, 120)),
            Some(Action::ShakeEightBall)
        );
        assert_eq!(page.handle_touch(TouchPoint::new(205, 120)), None);
    }

    #[test]
    fn test_answer_text() {
        let mut page = EightBallPage::new();
        assert_eq!(page.widgets.get(page.answer).text(), Some("Tap to ask"));
        page.on_event(&PageEvent::EightBall(EightBallSnapshot {
            answer: Some(19),
            shaking: false,
        }));
        assert_eq!(page.widgets.get(page.answer).text(), Some("Very doubtful"));
    }
}
