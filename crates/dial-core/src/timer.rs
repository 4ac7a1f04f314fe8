// src/timer.rs
//! Stopwatch / countdown engine behind the timer page.
//!
//! The engine is advanced with explicit [`Instant`]s. Every whole second
//! elapsed since the last tick is consumed at once, and `last_tick` moves
//! forward by exactly the seconds consumed so a late frame never drifts.

use embassy_time::{Duration, Instant};
use log::debug;

use crate::ui::core::{Step, TimerCommand};

/// Count-up minutes roll over at this value.
pub const MINUTES_CEILING: u32 = 100;

const SECONDS_PER_MINUTE: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerDirection {
    #[default]
    CountDown,
    CountUp,
}

/// What the timer page needs to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub minutes: u8,
    pub seconds: u8,
    pub running: bool,
    pub direction: TimerDirection,
}

#[derive(Debug, Clone)]
pub struct TimerEngine {
    minutes: u8,
    seconds: u8,
    running: bool,
    direction: TimerDirection,
    last_tick: Instant,
}

impl TimerEngine {
    pub fn new(now: Instant) -> Self {
        Self {
            minutes: 0,
            seconds: 0,
            running: false,
            direction: TimerDirection::default(),
            last_tick: now,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn direction(&self) -> TimerDirection {
        self.direction
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            minutes: self.minutes,
            seconds: self.seconds,
            running: self.running,
            direction: self.direction,
        }
    }

    /// Start or stop. The displayed value is untouched.
    pub fn toggle(&mut self, now: Instant) {
        self.running = !self.running;
        if self.running {
            self.last_tick = now;
        }
        debug!("Timer running={}", self.running);
    }

    /// Change direction; applies from the next tick on.
    pub fn select(&mut self, direction: TimerDirection) {
        self.direction = direction;
    }

    pub fn reset(&mut self) {
        self.minutes = 0;
        self.seconds = 0;
        self.running = false;
    }

    /// Manual minute adjustment, wrapping modulo 60. Ignored while running.
    pub fn adjust_minutes(&mut self, step: Step) -> bool {
        if self.running {
            return false;
        }
        self.minutes = wrap60(self.minutes, step);
        true
    }

    /// Manual second adjustment, wrapping modulo 60. Ignored while running.
    pub fn adjust_seconds(&mut self, step: Step) -> bool {
        if self.running {
            return false;
        }
        self.seconds = wrap60(self.seconds, step);
        true
    }

    /// Apply a timer page command. Returns `true` if the snapshot changed.
    pub fn apply(&mut self, command: TimerCommand, now: Instant) -> bool {
        let before = self.snapshot();
        match command {
            TimerCommand::ToggleRun => self.toggle(now),
            TimerCommand::SelectCountDown => self.select(TimerDirection::CountDown),
            TimerCommand::SelectCountUp => self.select(TimerDirection::CountUp),
            TimerCommand::Reset => self.reset(),
            TimerCommand::AdjustMinutes(step) => {
                self.adjust_minutes(step);
            }
            TimerCommand::AdjustSeconds(step) => {
                self.adjust_seconds(step);
            }
        }
        self.snapshot() != before
    }

    /// Consume elapsed whole seconds. Returns `true` if the snapshot changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let elapsed = now.saturating_duration_since(self.last_tick).as_secs();
        if elapsed == 0 {
            return false;
        }
        self.last_tick += Duration::from_secs(elapsed);

        let total = self.minutes as u32 * SECONDS_PER_MINUTE + self.seconds as u32;
        let next = match self.direction {
            TimerDirection::CountDown => {
                // Reaching 00:00 takes `total` ticks; the one after that stops.
                if elapsed > total as u64 {
                    self.running = false;
                    debug!("Countdown finished");
                    0
                } else {
                    total - elapsed as u32
                }
            }
            TimerDirection::CountUp => {
                let span = (MINUTES_CEILING * SECONDS_PER_MINUTE) as u64;
                ((total as u64 + elapsed) % span) as u32
            }
        };
        self.minutes = (next / SECONDS_PER_MINUTE) as u8;
        self.seconds = (next % SECONDS_PER_MINUTE) as u8;
        true
    }

    #[cfg(test)]
    fn set_value(&mut self, minutes: u8, seconds: u8) {
        self.minutes = minutes;
        self.seconds = seconds;
    }
}

fn wrap60(value: u8, step: Step) -> u8 {
    (value as i32 + step.delta()).rem_euclid(SECONDS_PER_MINUTE as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Instant {
        Instant::from_secs(1_000)
    }

    #[test]
    fn test_countdown_stops_one_tick_after_zero() {
        let t0 = start();
        let mut timer = TimerEngine::new(t0);
        timer.set_value(0, 5);
        timer.toggle(t0);

        for s in 1..=5u64 {
            timer.tick(t0 + Duration::from_secs(s));
        }
        let snap = timer.snapshot();
        assert_eq!((snap.minutes, snap.seconds), (0, 0), "reaches 00:00 after 5s");
        assert!(snap.running, "still running at 00:00");

        timer.tick(t0 + Duration::from_secs(6));
        let snap = timer.snapshot();
        assert!(!snap.running, "stops on the following tick");
        assert_eq!((snap.minutes, snap.seconds), (0, 0), "never goes negative");
    }

    #[test]
    fn test_countdown_borrows_minutes() {
        let t0 = start();
        let mut timer = TimerEngine::new(t0);
        timer.set_value(1, 0);
        timer.toggle(t0);
        timer.tick(t0 + Duration::from_secs(1));
        assert_eq!(timer.snapshot().minutes, 0);
        assert_eq!(timer.snapshot().seconds, 59);
    }

    #[test]
    fn test_countup_rolls_minutes() {
        let t0 = start();
        let mut timer = TimerEngine::new(t0);
        timer.select(TimerDirection::CountUp);
        timer.set_value(0, 59);
        timer.toggle(t0);
        timer.tick(t0 + Duration::from_secs(1));
        let snap = timer.snapshot();
        assert_eq!((snap.minutes, snap.seconds), (1, 0), "00:59 -> 01:00");
    }

    #[test]
    fn test_countup_wraps_at_ceiling() {
        let t0 = start();
        let mut timer = TimerEngine::new(t0);
        timer.select(TimerDirection::CountUp);
        timer.set_value(99, 59);
        timer.toggle(t0);
        timer.tick(t0 + Duration::from_secs(1));
        let snap = timer.snapshot();
        assert_eq!((snap.minutes, snap.seconds), (0, 0), "99:59 -> 00:00");
    }

    #[test]
    fn test_late_frame_catches_up_without_drift() {
        let t0 = start();
        let mut timer = TimerEngine::new(t0);
        timer.set_value(0, 30);
        timer.toggle(t0);

        assert!(timer.tick(t0 + Duration::from_millis(2_500)));
        assert_eq!(timer.snapshot().seconds, 28, "two whole seconds consumed");

        // The half second left over counts towards the next tick.
        assert!(timer.tick(t0 + Duration::from_millis(3_000)));
        assert_eq!(timer.snapshot().seconds, 27);
    }

    #[test]
    fn test_sub_second_tick_is_noop() {
        let t0 = start();
        let mut timer = TimerEngine::new(t0);
        timer.set_value(0, 10);
        timer.toggle(t0);
        assert!(!timer.tick(t0 + Duration::from_millis(999)));
        assert_eq!(timer.snapshot().seconds, 10);
    }

    #[test]
    fn test_arrows_only_while_paused() {
        let t0 = start();
        let mut timer = TimerEngine::new(t0);
        assert!(timer.adjust_minutes(Step::Down));
        assert_eq!(timer.snapshot().minutes, 59, "0 wraps down to 59");
        assert!(timer.adjust_seconds(Step::Up));

        timer.toggle(t0);
        assert!(!timer.apply(TimerCommand::AdjustSeconds(Step::Up), t0));
        assert_eq!(timer.snapshot().seconds, 1);
    }

    #[test]
    fn test_direction_change_keeps_value_and_reset_pauses() {
        let t0 = start();
        let mut timer = TimerEngine::new(t0);
        timer.set_value(3, 15);
        timer.toggle(t0);
        timer.apply(TimerCommand::SelectCountUp, t0);
        assert_eq!(timer.snapshot().minutes, 3, "value survives direction change");
        assert!(timer.is_running());

        timer.apply(TimerCommand::Reset, t0);
        let snap = timer.snapshot();
        assert_eq!((snap.minutes, snap.seconds, snap.running), (0, 0, false));
    }

    #[test]
    fn test_toggle_rearms_last_tick() {
        let t0 = start();
        let mut timer = TimerEngine::new(t0);
        timer.set_value(0, 10);
        // Started long after construction: no stale seconds are consumed.
        let later = t0 + Duration::from_secs(100);
        timer.toggle(later);
        assert!(!timer.tick(later + Duration::from_millis(500)));
        assert_eq!(timer.snapshot().seconds, 10);
    }
}
