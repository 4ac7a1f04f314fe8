// src/pages/page_manager.rs
//! Page manager with navigation and event broadcasting.
//!
//! Every page is built once at startup and lives for the whole run. The
//! manager tracks a single `current` page; a page is visible exactly when it
//! is the current one.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;
use log::{debug, info};

extern crate alloc;
use alloc::boxed::Box;

use crate::pages::page::{Page, PageWrapper};
use crate::pages::{
    CalculatorPage, CalendarPage, ClockPage, DateTimeSetPage, DicePage, EightBallPage, ExtraPage,
    SettingsPage, TimerPage,
};
use crate::ui::core::{Action, PageEvent, PageId, TouchPoint};
use crate::ui::styling::ThemeColors;

/// Number of pages on the watch.
pub const PAGE_COUNT: usize = PageId::ALL.len();

/// Manages page navigation, rendering, and event dispatching.
pub struct PageManager {
    pages: Vec<PageWrapper, PAGE_COUNT>,
    current_page: PageId,
}

impl PageManager {
    pub fn new(initial_page: PageId) -> Self {
        Self {
            pages: Vec::new(),
            current_page: initial_page,
        }
    }

    /// Manager with every watch page registered, showing the clock.
    pub fn with_all_pages() -> Self {
        let mut manager = Self::new(PageId::Clock);
        manager.register_page(PageWrapper::Clock(Box::new(ClockPage::new())));
        manager.register_page(PageWrapper::Timer(Box::new(TimerPage::new())));
        manager.register_page(PageWrapper::Settings(Box::new(SettingsPage::new())));
        manager.register_page(PageWrapper::Calendar(Box::new(CalendarPage::new())));
        manager.register_page(PageWrapper::Extra(Box::new(ExtraPage::new())));
        manager.register_page(PageWrapper::EightBall(Box::new(EightBallPage::new())));
        manager.register_page(PageWrapper::Dice(Box::new(DicePage::new())));
        manager.register_page(PageWrapper::Calculator(Box::new(CalculatorPage::new())));
        manager.register_page(PageWrapper::DateTimeSet(Box::new(DateTimeSetPage::new())));
        manager
    }

    /// Register a new page
    pub fn register_page(&mut self, page: PageWrapper) {
        self.pages.push(page).ok();
    }

    /// Make `page_id` the active page. Returns `false` if it already was.
    pub fn navigate_to(&mut self, page_id: PageId) -> bool {
        if page_id == self.current_page {
            return false;
        }
        if let Some(current) = self.get_current_page_mut() {
            current.on_deactivate();
        }

        info!("Page {:?} -> {:?}", self.current_page, page_id);
        self.current_page = page_id;

        if let Some(new_page) = self.get_current_page_mut() {
            new_page.on_activate();
            debug!("Showing {}", new_page.title());
        }
        true
    }

    fn get_current_page_mut(&mut self) -> Option<&mut PageWrapper> {
        self.pages.iter_mut().find(|p| p.id() == self.current_page)
    }

    fn get_current_page(&self) -> Option<&PageWrapper> {
        self.pages.iter().find(|p| p.id() == self.current_page)
    }

    /// Look up any registered page.
    pub fn page(&self, id: PageId) -> Option<&PageWrapper> {
        self.pages.iter().find(|p| p.id() == id)
    }

    /// Hit-test a touch against the current page.
    pub fn handle_touch(&mut self, point: TouchPoint) -> Option<Action> {
        debug!("Processing touch at {:?} on {:?}", point, self.current_page);
        let result = self.get_current_page_mut()?.handle_touch(point);
        debug!("Touch result: {:?}", result);
        result
    }

    /// Broadcast an event to every page so hidden pages stay current.
    ///
    /// Returns `true` if the current page needs a redraw.
    pub fn dispatch_event(&mut self, event: &PageEvent) -> bool {
        let mut current_changed = false;
        for page in self.pages.iter_mut() {
            let changed = page.on_event(event);
            if page.id() == self.current_page {
                current_changed = changed;
            }
        }
        current_changed
    }

    /// Recolor every widget of every page.
    pub fn apply_theme(&mut self, colors: &ThemeColors) {
        debug!("Applying theme {:?}", colors);
        for page in self.pages.iter_mut() {
            page.apply_theme(colors);
        }
    }

    /// Draw the current page only if it changed. Returns `true` if drawn.
    pub fn draw_dirty<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        match self.get_current_page_mut() {
            Some(page) if page.is_dirty() => {
                page.draw_page(display)?;
                page.mark_clean();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Check if current page is dirty
    pub fn is_dirty(&self) -> bool {
        self.get_current_page().is_some_and(|page| page.is_dirty())
    }

    /// Get current page ID
    pub fn current_page_id(&self) -> PageId {
        self.current_page
    }

    /// Whether `id` is the page on screen.
    pub fn is_visible(&self, id: PageId) -> bool {
        self.current_page == id
    }
}
