// src/pages/calendar.rs
//! Month view with previous/next arrows in the header and today's cell
//! highlighted.

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use super::chrome::{add_frame, add_return_icon};
use super::constants::*;
use super::page::Page;
use crate::calendar::{CalendarGrid, GRID_CELLS, month_name};
use crate::ui::core::{Action, CalendarCommand, PageEvent, PageId, TouchPoint};
use crate::ui::region::{EDGE, Region, first_hit};
use crate::ui::styling::{COLOR_MUTED, WHITE};
use crate::ui::widgets::{Paint, TextSize, Widget, WidgetId, WidgetRegistry};

const HEADER_BOTTOM: u16 = 48;

const CALENDAR_REGIONS: [(Region, Action); 3] = [
    (RETURN_REGION, Action::NavigateToPage(PageId::Clock)),
    (
        Region::rect(0, 0, 80, HEADER_BOTTOM),
        Action::Calendar(CalendarCommand::PreviousMonth),
    ),
    (
        Region::rect(160, 0, EDGE, HEADER_BOTTOM),
        Action::Calendar(CalendarCommand::NextMonth),
    ),
];

const GRID_LEFT_PX: i32 = 29;
const GRID_TOP_PX: i32 = 56;
const CELL_WIDTH_PX: i32 = 26;
const CELL_HEIGHT_PX: i32 = 24;

const WEEKDAY_INITIALS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

fn cell_center(index: usize) -> Point {
    let col = (index % 7) as i32;
    let row = (index / 7) as i32;
    Point::new(
        GRID_LEFT_PX + col * CELL_WIDTH_PX + CELL_WIDTH_PX / 2,
        GRID_TOP_PX + row * CELL_HEIGHT_PX + CELL_HEIGHT_PX / 2,
    )
}

fn highlight_bounds(index: usize) -> Rectangle {
    Rectangle::with_center(cell_center(index), Size::new(22, 18))
}

pub struct CalendarPage {
    widgets: WidgetRegistry,
    header: WidgetId,
    highlight: WidgetId,
    cells: [WidgetId; GRID_CELLS],
    dirty: bool,
}

impl CalendarPage {
    pub fn new() -> Self {
        let mut widgets = WidgetRegistry::new();
        add_frame(&mut widgets);

        let header = widgets.add(Widget::label("", Point::new(120, 24), TextSize::Small));
        widgets.add(Widget::label("<", Point::new(44, 36), TextSize::Medium));
        widgets.add(Widget::label(">", Point::new(196, 36), TextSize::Medium));

        for (col, initial) in WEEKDAY_INITIALS.iter().enumerate() {
            let x = cell_center(col).x;
            widgets.add(
                Widget::label(initial, Point::new(x, GRID_TOP_PX - 4), TextSize::Small)
                    .with_fill(Paint::fixed(COLOR_MUTED)),
            );
        }

        // Drawn before the day numbers so they sit on top of it.
        let highlight = widgets.add(
            Widget::rounded_rect(highlight_bounds(0), 4)
                .with_fill(Paint::outline())
                .hidden(),
        );

        let cells = core::array::from_fn(|i| {
            widgets.add(
                Widget::label("", cell_center(i), TextSize::Small).with_fill(Paint::fixed(WHITE)),
            )
        });

        add_return_icon(&mut widgets);

        Self {
            widgets,
            header,
            highlight,
            cells,
            dirty: true,
        }
    }

    fn show(&mut self, grid: &CalendarGrid) -> bool {
        let mut title: String<24> = String::new();
        write!(title, "{} {}", month_name(grid.month), grid.year).ok();
        let mut changed = self.widgets.set_text(self.header, &title);

        for (id, day) in self.cells.iter().zip(grid.cells.iter()) {
            let mut text: String<4> = String::new();
            if let Some(day) = day {
                write!(text, "{}", day).ok();
            }
            changed |= self.widgets.set_text(*id, &text);
        }

        let marker = self.widgets.get_mut(self.highlight);
        match grid.highlight {
            Some(index) => {
                changed |= marker.set_bounds(highlight_bounds(index));
                changed |= marker.set_visible(true);
            }
            None => changed |= marker.set_visible(false),
        }
        changed
    }
}

impl Default for CalendarPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for CalendarPage {
    fn id(&self) -> PageId {
        PageId::Calendar
    }

    fn title(&self) -> &str {
        "Calendar"
    }

    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        first_hit(&CALENDAR_REGIONS, point)
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        let changed = match event {
            PageEvent::Calendar(grid) => self.show(grid),
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

    #[test]
    fn test_header_regions() {
        let mut page = CalendarPage::new();
        assert_eq!(
            page.handle_touch(TouchPoint::new(40, 20)),
            Some(Action::Calendar(CalendarCommand::PreviousMonth))
        );
        assert_eq!(
            page.handle_touch(TouchPoint::new(200, 20)),
            Some(Action::Calendar(CalendarCommand::NextMonth))
        );
        assert_eq!(page.handle_touch(TouchPoint::new(120, 20)), None, "title is inert");
        assert_eq!(page.handle_touch(TouchPoint::new(120, 100)), None, "grid is inert");
    }

    #[test]
    fn test_grid_event_fills_cells_and_highlight() {
        let mut page = CalendarPage::new();
        let today = DateTime::new(2024, 1, 15, 8, 0, 0);
        let grid = CalendarGrid::build(2024, 1, Some(&today));
        assert!(page.on_event(&PageEvent::Calendar(grid)));

        assert_eq!(page.widgets.get(page.header).text(), Some("January 2024"));
        assert_eq!(page.widgets.get(page.cells[0]).text(), Some("1"));
        assert_eq!(page.widgets.get(page.cells[30]).text(), Some("31"));
        assert_eq!(page.widgets.get(page.cells[31]).text(), Some(""));
        assert!(page.widgets.get(page.highlight).is_visible());

        let february = CalendarGrid::build(2024, 2, Some(&today));
        page.on_event(&PageEvent::Calendar(february));
        assert!(
            !page.widgets.get(page.highlight).is_visible(),
            "no highlight outside the current month"
        );
    }

    #[test]
    fn test_cells_stay_inside_grid() {
        let last = cell_center(GRID_CELLS - 1);
        assert!(last.x < 211 && last.y < 200, "last cell at {:?}", last);
    }
}
