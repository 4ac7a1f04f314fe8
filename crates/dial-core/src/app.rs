// src/app.rs
//! Main loop body shared by the firmware and the simulator.
//!
//! The binary owns the executor and the display; each iteration it calls
//! [`App::step`] with the current instant, draws through [`App::draw`],
//! flushes, and sleeps for the returned duration. Every hardware call is
//! fail-soft: errors are logged and replaced by a default, and nothing
//! propagates out of the loop.

use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{info, warn};

use crate::app_state::AppState;
use crate::calendar::CalendarView;
use crate::config::LoopTimings;
use crate::datetime::PendingDateTimeEdit;
use crate::dispatcher::{Dispatch, Dispatcher, Effect, apply_action, enter_page, sync_pages};
use crate::hal::{Backlight, Board, ClockSource, TouchSource};
use crate::pages::PageManager;
use crate::storage::{load_theme, save_theme};
use crate::ui::{PageEvent, PageId};

/// Clock reads away from the clock face, keeping date staging fresh.
const BACKGROUND_CLOCK_INTERVAL: Duration = Duration::from_secs(1);

pub struct App {
    state: AppState,
    pages: PageManager,
    dispatcher: Dispatcher,
    timings: LoopTimings,
    /// Brightness last written to the backlight
    applied_level: Option<f32>,
    last_clock_read: Option<Instant>,
}

impl App {
    pub fn new(now: Instant) -> Self {
        Self::with_timings(now, LoopTimings::new())
    }

    pub fn with_timings(now: Instant, timings: LoopTimings) -> Self {
        Self {
            state: AppState::new(now, &timings),
            pages: PageManager::with_all_pages(),
            dispatcher: Dispatcher::new(),
            timings,
            applied_level: None,
            last_clock_read: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn pages(&self) -> &PageManager {
        &self.pages
    }

    /// Load the theme, take first readings and bring every page up to date.
    pub async fn boot<B: Board>(&mut self, board: &mut B, now: Instant) {
        self.state.theme = load_theme(board.store());
        self.state.screen_level = self.state.theme.brightness;
        info!("Theme loaded: {:?}", self.state.theme);

        self.read_clock(board, now).await;
        self.state.calendar = CalendarView::today(&self.state.clock);
        self.state.pending_edit = PendingDateTimeEdit::from(self.state.clock);
        self.state.battery.poll(board.battery(), now).await;
        self.state.last_interaction = now;

        sync_pages(&self.state, &mut self.pages);
        self.sync_backlight(board);
        info!("Boot complete on {:?}", self.pages.current_page_id());
    }

    /// Run one loop iteration. Returns how long to sleep before the next.
    pub async fn step<B: Board>(&mut self, board: &mut B, now: Instant) -> Duration {
        let sample = match board.touch().poll().await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Touch read failed: {}", e);
                None
            }
        };

        match self
            .dispatcher
            .process(sample, self.state.is_dimmed(), &mut self.pages)
        {
            Dispatch::Wake => {
                info!("Waking screen");
                self.state.wake(now);
            }
            Dispatch::Action(action) => {
                self.state.last_interaction = now;
                if let Some(effect) = apply_action(action, &mut self.state, &mut self.pages, now) {
                    self.run_effect(board, effect).await;
                }
            }
            Dispatch::Miss | Dispatch::Released | Dispatch::Held => {}
        }

        self.tick_engines(board, now);

        if !self.state.is_dimmed() {
            let on_clock = self.pages.is_visible(PageId::Clock);
            let clock_due = self.last_clock_read.is_none_or(|last| {
                now.saturating_duration_since(last) >= BACKGROUND_CLOCK_INTERVAL
            });
            if on_clock || clock_due {
                self.read_clock(board, now).await;
            }
            if self.state.battery.is_due(now) {
                let level = self.state.battery.poll(board.battery(), now).await;
                self.pages.dispatch_event(&PageEvent::Battery(level));
            }
        }

        if self.state.is_idle(now, &self.timings) {
            info!("Idle timeout, dimming");
            self.state.screen_level = 0.0;
            enter_page(PageId::Clock, &mut self.state, &mut self.pages);
        }

        self.sync_backlight(board);
        self.frame_delay()
    }

    /// Draw the current page if it changed. Returns `true` if anything was drawn.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<bool, D::Error> {
        self.pages.draw_dirty(display)
    }

    /// Sleep length for the current display state.
    pub fn frame_delay(&self) -> Duration {
        if self.state.is_dimmed() {
            self.timings.screen_off_frame
        } else if self.pages.current_page_id().is_interactive() {
            self.timings.interactive_frame
        } else {
            self.timings.clock_frame
        }
    }

    fn tick_engines<B: Board>(&mut self, board: &mut B, now: Instant) {
        if self.state.timer.tick(now) {
            self.pages
                .dispatch_event(&PageEvent::Timer(self.state.timer.snapshot()));
        }
        if self.state.dice.tick(now, board.random()) {
            self.pages
                .dispatch_event(&PageEvent::Dice(self.state.dice.snapshot()));
        }
        if self.state.eight_ball.tick(now, board.random()) {
            self.pages
                .dispatch_event(&PageEvent::EightBall(self.state.eight_ball.snapshot()));
        }
    }

    async fn read_clock<B: Board>(&mut self, board: &mut B, now: Instant) {
        self.last_clock_read = Some(now);
        match board.clock().now().await {
            Ok(reading) if reading.is_valid() => {
                if reading != self.state.clock {
                    self.state.clock = reading;
                    self.pages.dispatch_event(&PageEvent::Clock(reading));
                }
            }
            Ok(reading) => warn!("Ignoring invalid clock reading {:?}", reading),
            Err(e) => warn!("Clock read failed: {}", e),
        }
    }

    async fn run_effect<B: Board>(&mut self, board: &mut B, effect: Effect) {
        match effect {
            Effect::PersistTheme => {
                if let Err(e) = save_theme(board.store(), &self.state.theme) {
                    warn!("Failed to save theme: {}", e);
                }
            }
            Effect::CommitDateTime(value) => {
                if let Err(e) = board.clock().set(value).await {
                    warn!("Failed to set clock: {}", e);
                }
            }
        }
    }

    fn sync_backlight<B: Board>(&mut self, board: &mut B) {
        let level = self.state.screen_level;
        if self.applied_level != Some(level) {
            board.backlight().set_brightness(level);
            self.applied_level = Some(level);
        }
    }
}
