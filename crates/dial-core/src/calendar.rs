// src/calendar.rs
//! Gregorian calendar math and the month grid shown on the calendar page.

use crate::datetime::DateTime;
use crate::ui::core::CalendarCommand;

/// Cells in the month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1..=12). Out-of-range months report 0.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(if month <= 2 { year - 1 } else { year });
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = month as i64;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Weekday of a date, Monday = 0 .. Sunday = 6.
pub fn weekday(year: i32, month: u8, day: u8) -> u8 {
    // 1970-01-01 was a Thursday (3).
    (days_from_civil(year, month, day) + 3).rem_euclid(7) as u8
}

pub fn month_name(month: u8) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// A laid-out month ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u8,
    /// Day number per cell, `None` for blanks
    pub cells: [Option<u8>; GRID_CELLS],
    /// Cell index of today, if today falls in this month
    pub highlight: Option<usize>,
}

impl CalendarGrid {
    pub fn build(year: i32, month: u8, today: Option<&DateTime>) -> Self {
        let first = weekday(year, month, 1) as i32;
        let days = days_in_month(year, month) as i32;

        let mut cells = [None; GRID_CELLS];
        for (i, cell) in cells.iter_mut().enumerate() {
            let day = i as i32 - first + 1;
            if (1..=days).contains(&day) {
                *cell = Some(day as u8);
            }
        }

        let highlight = today
            .filter(|t| t.year as i32 == year && t.month == month)
            .and_then(|t| cells.iter().position(|c| *c == Some(t.day)));

        Self {
            year,
            month,
            cells,
            highlight,
        }
    }
}

/// The month being browsed. Independent of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub year: i32,
    pub month: u8,
}

impl CalendarView {
    pub fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    pub fn today(today: &DateTime) -> Self {
        Self::new(today.year as i32, today.month)
    }

    pub fn next_month(&mut self) {
        if self.month >= 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    pub fn previous_month(&mut self) {
        if self.month <= 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    pub fn apply(&mut self, command: CalendarCommand) {
        match command {
            CalendarCommand::NextMonth => self.next_month(),
            CalendarCommand::PreviousMonth => self.previous_month(),
        }
    }

    pub fn grid(&self, today: Option<&DateTime>) -> CalendarGrid {
        CalendarGrid::build(self.year, self.month, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_february() {
        assert_eq!(days_in_month(2024, 2), 29, "2024 is a leap year");
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29, "divisible by 400");
        assert_eq!(days_in_month(1900, 2), 28, "divisible by 100 only");
    }

    #[test]
    fn test_days_in_other_months() {
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(2023, 13), 0);
    }

    #[test]
    fn test_weekday_known_dates() {
        assert_eq!(weekday(2024, 1, 1), 0, "2024-01-01 is a Monday");
        assert_eq!(weekday(2000, 1, 1), 5, "2000-01-01 is a Saturday");
        assert_eq!(weekday(1970, 1, 1), 3, "1970-01-01 is a Thursday");
        assert_eq!(weekday(2023, 10, 1), 6, "2023-10-01 is a Sunday");
    }

    #[test]
    fn test_grid_layout() {
        // September 2024 starts on a Sunday and has 30 days.
        let grid = CalendarGrid::build(2024, 9, None);
        assert_eq!(grid.cells[5], None);
        assert_eq!(grid.cells[6], Some(1), "first day in the Sunday column");
        assert_eq!(grid.cells[35], Some(30));
        assert_eq!(grid.cells[36], None);
        assert_eq!(grid.cells.iter().flatten().count(), 30);
        assert_eq!(grid.highlight, None);
    }

    #[test]
    fn test_highlight_only_in_current_month() {
        let today = DateTime::new(2024, 1, 15, 9, 0, 0);
        let grid = CalendarGrid::build(2024, 1, Some(&today));
        assert_eq!(grid.highlight, Some(14), "Jan 2024 starts Monday, day 15 is cell 14");

        let other = CalendarGrid::build(2024, 2, Some(&today));
        assert_eq!(other.highlight, None);
    }

    #[test]
    fn test_navigation_carries_year() {
        let mut view = CalendarView::new(2024, 12);
        view.apply(CalendarCommand::NextMonth);
        assert_eq!(view, CalendarView::new(2025, 1));
        view.apply(CalendarCommand::PreviousMonth);
        view.apply(CalendarCommand::PreviousMonth);
        assert_eq!(view, CalendarView::new(2024, 11));
    }
}
