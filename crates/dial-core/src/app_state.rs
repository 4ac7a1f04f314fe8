// src/app_state.rs
//! Application-wide state for the watch.
//!
//! [`AppState`] owns every engine plus the theme and the screen level. It is
//! created once at boot and handed by reference to the dispatcher and the
//! main loop; nothing here is global.

use embassy_time::Instant;

use crate::battery::BatteryMonitor;
use crate::calculator::Calculator;
use crate::calendar::CalendarView;
use crate::config::{DIM_THRESHOLD, LoopTimings};
use crate::datetime::{DateTime, PendingDateTimeEdit};
use crate::theme::Theme;
use crate::timer::TimerEngine;
use crate::toys::{Dice, EightBall};
use crate::ui::PageEvent;

/// Clock reading used until the first successful RTC read.
pub const FALLBACK_DATETIME: DateTime = DateTime::new(2000, 1, 1, 0, 0, 0);

/// Main application state container
pub struct AppState {
    pub theme: Theme,
    pub timer: TimerEngine,
    pub calendar: CalendarView,
    pub calculator: Calculator,
    pub dice: Dice,
    pub eight_ball: EightBall,
    pub pending_edit: PendingDateTimeEdit,
    pub battery: BatteryMonitor,
    /// Last successful clock reading
    pub clock: DateTime,
    /// Brightness currently applied to the panel; `0.0` when blanked
    pub screen_level: f32,
    pub last_interaction: Instant,
}

impl AppState {
    pub fn new(now: Instant, timings: &LoopTimings) -> Self {
        let theme = Theme::default();
        Self {
            theme,
            timer: TimerEngine::new(now),
            calendar: CalendarView::today(&FALLBACK_DATETIME),
            calculator: Calculator::new(),
            dice: Dice::new(timings.toy_animation),
            eight_ball: EightBall::new(timings.toy_animation),
            pending_edit: PendingDateTimeEdit::from(FALLBACK_DATETIME),
            battery: BatteryMonitor::new(timings.battery_interval),
            clock: FALLBACK_DATETIME,
            screen_level: theme.brightness,
            last_interaction: now,
        }
    }

    /// Whether a touch should wake the screen instead of being dispatched.
    pub fn is_dimmed(&self) -> bool {
        self.screen_level < DIM_THRESHOLD
    }

    /// Restore the configured brightness and restart the idle clock.
    pub fn wake(&mut self, now: Instant) {
        self.screen_level = self.theme.brightness;
        self.last_interaction = now;
    }

    /// Whether the idle timeout has elapsed with the screen still lit.
    ///
    /// A running timer keeps the screen on.
    pub fn is_idle(&self, now: Instant, timings: &LoopTimings) -> bool {
        !self.is_dimmed()
            && !self.timer.is_running()
            && now.saturating_duration_since(self.last_interaction) > timings.idle_timeout
    }

    /// One event per engine, used to bring every page in line with the state.
    pub fn snapshot_events(&self) -> [PageEvent; 8] {
        [
            PageEvent::Clock(self.clock),
            PageEvent::Battery(self.battery.level()),
            PageEvent::Timer(self.timer.snapshot()),
            PageEvent::Theme(self.theme),
            PageEvent::Calendar(self.calendar.grid(Some(&self.clock))),
            PageEvent::Calculator(self.calculator.display_buffer()),
            PageEvent::Dice(self.dice.snapshot()),
            PageEvent::EightBall(self.eight_ball.snapshot()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_time::Duration;

    fn state() -> AppState {
        AppState::new(Instant::from_secs(100), &LoopTimings::new())
    }

    #[test]
    fn test_boots_lit_at_theme_brightness() {
        let state = state();
        assert_eq!(state.screen_level, state.theme.brightness);
        assert!(!state.is_dimmed());
    }

    #[test]
    fn test_idle_after_timeout() {
        let timings = LoopTimings::new();
        let state = state();
        let start = Instant::from_secs(100);
        assert!(!state.is_idle(start + Duration::from_secs(5), &timings), "exactly 5 s is not idle");
        assert!(state.is_idle(start + Duration::from_millis(5_001), &timings));
    }

    #[test]
    fn test_running_timer_suppresses_idle() {
        let timings = LoopTimings::new();
        let mut state = state();
        let start = Instant::from_secs(100);
        state.timer.toggle(start);
        assert!(!state.is_idle(start + Duration::from_secs(60), &timings));
    }

    #[test]
    fn test_wake_restores_configured_brightness() {
        let mut state = state();
        state.theme.brightness = 0.75;
        state.screen_level = 0.0;
        assert!(state.is_dimmed());
        let later = Instant::from_secs(200);
        state.wake(later);
        assert_eq!(state.screen_level, 0.75);
        assert_eq!(state.last_interaction, later);
    }
}
