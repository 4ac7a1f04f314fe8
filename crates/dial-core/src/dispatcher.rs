// src/dispatcher.rs
//! Touch debouncing and action application.
//!
//! [`Dispatcher::process`] turns a raw touch sample into at most one
//! [`Dispatch`] per contact. [`apply_action`] then mutates the engines, pushes
//! the resulting snapshots into the pages and reports any side effect the
//! main loop must carry out against hardware.

use embassy_time::Instant;
use log::{debug, info};

use crate::app_state::AppState;
use crate::calendar::CalendarView;
use crate::datetime::{DateTime, PendingDateTimeEdit};
use crate::pages::PageManager;
use crate::ui::core::{Action, DateTimeCommand, PageEvent, PageId, TouchPoint};

/// Outcome of one touch sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// No contact reported
    Released,
    /// Contact continues from an earlier frame
    Held,
    /// Down-edge on a dimmed screen; consumed by the wake
    Wake,
    /// Down-edge outside every region of the current page
    Miss,
    /// Down-edge that hit a region
    Action(Action),
}

/// Side effects that need hardware access.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Theme changed; write the settings record
    PersistTheme,
    /// Write a new wall-clock time to the RTC
    CommitDateTime(DateTime),
}

/// Rising-edge touch filter.
#[derive(Debug, Default)]
pub struct Dispatcher {
    touch_down: bool,
}

impl Dispatcher {
    pub const fn new() -> Self {
        Self { touch_down: false }
    }

    /// Whether a contact is currently held.
    pub fn is_touch_down(&self) -> bool {
        self.touch_down
    }

    /// Debounce a sample and hit-test it against the current page.
    ///
    /// Only the first frame of a contact can produce an action. When
    /// `dimmed` is set the down-edge wakes the screen and is not hit-tested.
    pub fn process(
        &mut self,
        sample: Option<TouchPoint>,
        dimmed: bool,
        pages: &mut PageManager,
    ) -> Dispatch {
        let Some(point) = sample else {
            self.touch_down = false;
            return Dispatch::Released;
        };
        if self.touch_down {
            return Dispatch::Held;
        }
        self.touch_down = true;

        if dimmed {
            debug!("Touch at {:?} wakes the screen", point);
            return Dispatch::Wake;
        }
        match pages.handle_touch(point) {
            Some(action) => Dispatch::Action(action),
            None => Dispatch::Miss,
        }
    }
}

/// Push the full engine state into every page.
pub fn sync_pages(state: &AppState, pages: &mut PageManager) {
    pages.apply_theme(&state.theme.colors());
    for event in state.snapshot_events() {
        pages.dispatch_event(&event);
    }
}

/// Apply an action to the engines and pages.
pub fn apply_action(
    action: Action,
    state: &mut AppState,
    pages: &mut PageManager,
    now: Instant,
) -> Option<Effect> {
    debug!("Applying {:?}", action);
    match action {
        Action::NavigateToPage(id) => {
            enter_page(id, state, pages);
            None
        }
        Action::ScreenOff => {
            info!("Screen off");
            state.screen_level = 0.0;
            None
        }
        Action::Timer(command) => {
            if state.timer.apply(command, now) {
                pages.dispatch_event(&PageEvent::Timer(state.timer.snapshot()));
            }
            None
        }
        Action::Theme(command) => {
            if !state.theme.apply(command) {
                return None;
            }
            pages.apply_theme(&state.theme.colors());
            pages.dispatch_event(&PageEvent::Theme(state.theme));
            state.screen_level = state.theme.brightness;
            Some(Effect::PersistTheme)
        }
        Action::Calendar(command) => {
            state.calendar.apply(command);
            pages.dispatch_event(&PageEvent::Calendar(state.calendar.grid(Some(&state.clock))));
            None
        }
        Action::Calculator(key) => {
            state.calculator.press(key);
            pages.dispatch_event(&PageEvent::Calculator(state.calculator.display_buffer()));
            None
        }
        Action::DateTime(DateTimeCommand::Adjust(field, step)) => {
            state.pending_edit.adjust(field, step);
            pages.dispatch_event(&PageEvent::DateTimeEdit(state.pending_edit));
            None
        }
        Action::DateTime(DateTimeCommand::Save) => {
            let committed = state.pending_edit.to_datetime();
            info!("Setting clock to {:?}", committed);
            state.clock = committed;
            pages.dispatch_event(&PageEvent::Clock(committed));
            enter_page(PageId::Settings, state, pages);
            Some(Effect::CommitDateTime(committed))
        }
        Action::DateTime(DateTimeCommand::Cancel) => {
            enter_page(PageId::Settings, state, pages);
            None
        }
        Action::RollDice => {
            state.dice.roll(now);
            pages.dispatch_event(&PageEvent::Dice(state.dice.snapshot()));
            None
        }
        Action::ShakeEightBall => {
            state.eight_ball.shake(now);
            pages.dispatch_event(&PageEvent::EightBall(state.eight_ball.snapshot()));
            None
        }
    }
}

/// Navigate, preparing the state some pages show on entry.
///
/// The calendar opens on the current month and the date/time editor opens
/// on a fresh copy of the clock, so an abandoned edit never resurfaces.
pub fn enter_page(id: PageId, state: &mut AppState, pages: &mut PageManager) {
    match id {
        PageId::Calendar => {
            state.calendar = CalendarView::today(&state.clock);
            pages.dispatch_event(&PageEvent::Calendar(state.calendar.grid(Some(&state.clock))));
        }
        PageId::DateTimeSet => {
            state.pending_edit = PendingDateTimeEdit::from(state.clock);
            pages.dispatch_event(&PageEvent::DateTimeEdit(state.pending_edit));
        }
        _ => {}
    }
    pages.navigate_to(id);
}
