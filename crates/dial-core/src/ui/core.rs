// src/ui/core.rs
//! Core UI types for the dial page system: touch points, page identifiers,
//! actions produced by hit-testing, and events pushed into pages.

use embedded_graphics::prelude::*;

use crate::calculator::CalcKey;
use crate::calendar::CalendarGrid;
use crate::datetime::{DateField, DateTime, PendingDateTimeEdit};
use crate::theme::Theme;
use crate::timer::TimerSnapshot;
use crate::toys::{DiceSnapshot, EightBallSnapshot};

/// A single contact point in display coordinates (0..240 on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Page identifier for navigation.
///
/// Exactly one page is active at any time; see
/// [`PageManager`](crate::pages::PageManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Clock,
    Timer,
    Settings,
    Calendar,
    Extra,
    EightBall,
    Dice,
    Calculator,
    DateTimeSet,
}

impl PageId {
    /// Every page, in registration order.
    pub const ALL: [PageId; 9] = [
        PageId::Clock,
        PageId::Timer,
        PageId::Settings,
        PageId::Calendar,
        PageId::Extra,
        PageId::EightBall,
        PageId::Dice,
        PageId::Calculator,
        PageId::DateTimeSet,
    ];

    /// Whether the page wants fast polling for touch responsiveness.
    pub const fn is_interactive(self) -> bool {
        !matches!(self, PageId::Clock)
    }
}

/// Up/down step used by arrows and the settings columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

impl Step {
    pub const fn delta(self) -> i32 {
        match self {
            Step::Up => 1,
            Step::Down => -1,
        }
    }
}

/// Timer page commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    ToggleRun,
    SelectCountDown,
    SelectCountUp,
    Reset,
    AdjustMinutes(Step),
    AdjustSeconds(Step),
}

/// Settings page commands. Each one mutates the theme and is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCommand {
    CycleText(Step),
    CycleOutline(Step),
    Brightness(Step),
}

/// Calendar header commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCommand {
    PreviousMonth,
    NextMonth,
}

/// Date/time set page commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeCommand {
    Adjust(DateField, Step),
    Save,
    Cancel,
}

/// Actions that a page hit-test can produce.
///
/// A tap resolves to at most one action; applying it is the dispatcher's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Make another page the active page
    NavigateToPage(PageId),
    /// Blank the display without changing the configured brightness
    ScreenOff,
    Timer(TimerCommand),
    Theme(ThemeCommand),
    Calendar(CalendarCommand),
    Calculator(CalcKey),
    DateTime(DateTimeCommand),
    RollDice,
    ShakeEightBall,
}

/// Events pushed into pages so they can re-text their widgets.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// Wall-clock reading for the current frame
    Clock(DateTime),
    /// Battery percentage, already clamped to 0..=100
    Battery(u8),
    Timer(TimerSnapshot),
    Theme(Theme),
    Calendar(CalendarGrid),
    Calculator(heapless::String<16>),
    Dice(DiceSnapshot),
    EightBall(EightBallSnapshot),
    DateTimeEdit(PendingDateTimeEdit),
}
