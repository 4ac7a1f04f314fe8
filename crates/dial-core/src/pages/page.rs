// src/pages/page.rs
//! Core page abstraction and type-erased wrapper for the UI page system.
//!
//! This module defines the [`Page`] trait that all watch pages implement,
//! along with [`PageWrapper`], an enum-based wrapper that enables heterogeneous
//! storage of concrete page types without dynamic dispatch (`dyn`).
//!
//! # Page Trait
//!
//! Every page owns a [`WidgetRegistry`] built once at construction. After that
//! only the text, color and visibility of existing widgets change: events
//! re-text them, theme changes recolor them by role, and hit-testing maps a
//! touch to at most one [`Action`].
//!
//! # PageWrapper
//!
//! The [`PageManager`](super::page_manager::PageManager) stores a
//! `heapless::Vec<PageWrapper, N>` and routes calls through this wrapper.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::ui::core::{Action, PageEvent, PageId, TouchPoint};
use crate::ui::styling::{COLOR_BACKGROUND, ThemeColors};
use crate::ui::widgets::WidgetRegistry;
use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

extern crate alloc;
use alloc::boxed::Box;

use super::{
    CalculatorPage, CalendarPage, ClockPage, DateTimeSetPage, DicePage, EightBallPage, ExtraPage,
    SettingsPage, TimerPage,
};

/// Full-screen bounds shared by every page.
pub fn screen_bounds() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
    )
}

// ---------------------------------------------------------------------------
// Page trait
// ---------------------------------------------------------------------------

/// Trait that all navigable watch pages must implement.
///
/// The [`PageManager`](super::page_manager::PageManager) calls these methods in
/// a well-defined order each frame:
///
/// 1. **`on_activate`**: once, when the page becomes the active page.
/// 2. **`handle_touch`**: on a touch down-edge while this page is active.
/// 3. **`on_event`**: for every event, whether or not the page is active.
/// 4. **`apply_theme`**: whenever the theme changes.
/// 5. **`draw_page`**: when `is_dirty()` is true and the page is active.
/// 6. **`on_deactivate`**: once, when navigating away from the page.
pub trait Page {
    /// Unique identifier used for navigation and lookup.
    fn id(&self) -> PageId;

    /// Human-readable title for debug logs.
    fn title(&self) -> &str;

    /// Called once when this page becomes the active page.
    fn on_activate(&mut self) {
        self.mark_dirty();
    }

    /// Called once when this page is no longer the active page.
    fn on_deactivate(&mut self) {}

    /// Hit-test a touch point and optionally return an [`Action`].
    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action>;

    /// Handle an incoming [`PageEvent`].
    ///
    /// Returns `true` if the page needs a redraw.
    fn on_event(&mut self, _event: &PageEvent) -> bool {
        false
    }

    fn widgets(&self) -> &WidgetRegistry;

    fn widgets_mut(&mut self) -> &mut WidgetRegistry;

    /// Recolor every themed widget. Returns `true` if anything changed.
    fn apply_theme(&mut self, colors: &ThemeColors) -> bool {
        let changed = self.widgets_mut().apply_theme(colors);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    /// Render the entire page to the given display target.
    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        self.bounds()
            .into_styled(PrimitiveStyle::with_fill(COLOR_BACKGROUND))
            .draw(display)?;
        self.widgets().draw(display)
    }

    /// Bounding rectangle of this page.
    fn bounds(&self) -> Rectangle {
        screen_bounds()
    }

    /// Whether the page needs redrawing.
    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force the page to be redrawn on the next frame.
    fn mark_dirty(&mut self);
}

// ---------------------------------------------------------------------------
// PageWrapper
// ---------------------------------------------------------------------------

/// Enum-based wrapper that stores one of the concrete page types.
///
/// Each variant wraps its page in a [`Box`] to keep the enum size uniform
/// regardless of the underlying page's footprint.
///
/// When adding a new page, add a variant here and extend the `delegate!`
/// arms below.
pub enum PageWrapper {
    Clock(Box<ClockPage>),
    Timer(Box<TimerPage>),
    Settings(Box<SettingsPage>),
    Calendar(Box<CalendarPage>),
    Extra(Box<ExtraPage>),
    EightBall(Box<EightBallPage>),
    Dice(Box<DicePage>),
    Calculator(Box<CalculatorPage>),
    DateTimeSet(Box<DateTimeSetPage>),
}

macro_rules! delegate {
    ($self:ident, $page:ident => $call:expr) => {
        match $self {
            PageWrapper::Clock($page) => $call,
            PageWrapper::Timer($page) => $call,
            PageWrapper::Settings($page) => $call,
            PageWrapper::Calendar($page) => $call,
            PageWrapper::Extra($page) => $call,
            PageWrapper::EightBall($page) => $call,
            PageWrapper::Dice($page) => $call,
            PageWrapper::Calculator($page) => $call,
            PageWrapper::DateTimeSet($page) => $call,
        }
    };
}

impl Page for PageWrapper {
    fn id(&self) -> PageId {
        delegate!(self, page => page.id())
    }

    fn title(&self) -> &str {
        delegate!(self, page => page.title())
    }

    fn on_activate(&mut self) {
        delegate!(self, page => page.on_activate())
    }

    fn on_deactivate(&mut self) {
        delegate!(self, page => page.on_deactivate())
    }

    fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        delegate!(self, page => page.handle_touch(point))
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        delegate!(self, page => page.on_event(event))
    }

    fn widgets(&self) -> &WidgetRegistry {
        delegate!(self, page => page.widgets())
    }

    fn widgets_mut(&mut self) -> &mut WidgetRegistry {
        delegate!(self, page => page.widgets_mut())
    }

    fn apply_theme(&mut self, colors: &ThemeColors) -> bool {
        delegate!(self, page => page.apply_theme(colors))
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        delegate!(self, page => page.draw_page(display))
    }

    fn bounds(&self) -> Rectangle {
        delegate!(self, page => page.bounds())
    }

    fn is_dirty(&self) -> bool {
        delegate!(self, page => page.is_dirty())
    }

    fn mark_clean(&mut self) {
        delegate!(self, page => page.mark_clean())
    }

    fn mark_dirty(&mut self) {
        delegate!(self, page => page.mark_dirty())
    }
}
