// src/datetime.rs
//! Wall-clock readings and the staged edit used by the date/time set page.

use core::fmt::Write;

use heapless::String;

use crate::calendar::{days_in_month, weekday};
use crate::ui::core::Step;

/// Earliest year the set page offers.
pub const MIN_YEAR: u16 = 2000;
/// Latest year the set page offers (the RTC stores a two-digit year).
pub const MAX_YEAR: u16 = 2099;

const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A calendar date and time of day as read from the RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Default for DateTime {
    fn default() -> Self {
        Self {
            year: MIN_YEAR,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Whether every field is within its calendar range.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year as i32, self.month)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Monday = 0 .. Sunday = 6.
    pub fn weekday(&self) -> u8 {
        weekday(self.year as i32, self.month, self.day)
    }

    /// Three-letter weekday, e.g. `"Wed"`.
    pub fn weekday_name(&self) -> &'static str {
        WEEKDAY_NAMES[self.weekday() as usize % 7]
    }

    /// Day and month as shown under the clock, `DD/MM`.
    pub fn date_label(&self) -> String<8> {
        let mut out = String::new();
        write!(out, "{:02}/{:02}", self.day, self.month).ok();
        out
    }
}

/// Format a value as two zero-padded digits.
pub fn two_digits(value: u8) -> String<4> {
    let mut out = String::new();
    write!(out, "{:02}", value).ok();
    out
}

/// Columns of the date/time set page, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl DateField {
    pub const ALL: [DateField; 5] = [
        DateField::Year,
        DateField::Month,
        DateField::Day,
        DateField::Hour,
        DateField::Minute,
    ];
}

/// Staged copy of the date/time edited on the set page.
///
/// Nothing reaches the clock until the edit is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDateTimeEdit {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl From<DateTime> for PendingDateTimeEdit {
    fn from(value: DateTime) -> Self {
        let year = value.year.clamp(MIN_YEAR, MAX_YEAR);
        let month = value.month.clamp(1, 12);
        Self {
            year,
            month,
            day: value.day.clamp(1, days_in_month(year as i32, month)),
            hour: value.hour.min(23),
            minute: value.minute.min(59),
        }
    }
}

impl PendingDateTimeEdit {
    /// Step one field, wrapping within its range.
    ///
    /// Changing year or month clamps the day into the new month.
    pub fn adjust(&mut self, field: DateField, step: Step) {
        let delta = step.delta();
        match field {
            DateField::Year => {
                self.year = wrap(self.year as i32, delta, MIN_YEAR as i32, MAX_YEAR as i32) as u16;
            }
            DateField::Month => {
                self.month = wrap(self.month as i32, delta, 1, 12) as u8;
            }
            DateField::Day => {
                let last = days_in_month(self.year as i32, self.month) as i32;
                self.day = wrap(self.day as i32, delta, 1, last) as u8;
            }
            DateField::Hour => self.hour = wrap(self.hour as i32, delta, 0, 23) as u8,
            DateField::Minute => self.minute = wrap(self.minute as i32, delta, 0, 59) as u8,
        }
        self.day = self.day.min(days_in_month(self.year as i32, self.month));
    }

    pub fn field(&self, field: DateField) -> u16 {
        match field {
            DateField::Year => self.year,
            DateField::Month => self.month as u16,
            DateField::Day => self.day as u16,
            DateField::Hour => self.hour as u16,
            DateField::Minute => self.minute as u16,
        }
    }

    /// The value written to the clock on save. Seconds restart at zero.
    pub fn to_datetime(&self) -> DateTime {
        DateTime::new(self.year, self.month, self.day, self.hour, self.minute, 0)
    }
}

fn wrap(value: i32, delta: i32, min: i32, max: i32) -> i32 {
    let span = max - min + 1;
    min + (value - min + delta).rem_euclid(span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_name() {
        let date = DateTime::new(2024, 1, 1, 0, 0, 0);
        assert_eq!(date.weekday_name(), "Mon", "2024-01-01 is a Monday");
        let date = DateTime::new(2026, 10, 16, 0, 0, 0);
        assert_eq!(date.weekday_name(), "Fri");
    }

    #[test]
    fn test_date_label_format() {
        let date = DateTime::new(2025, 3, 7, 0, 0, 0);
        assert_eq!(date.date_label().as_str(), "07/03");
    }

    #[test]
    fn test_adjust_wraps_each_field() {
        let mut edit = PendingDateTimeEdit::from(DateTime::new(2099, 12, 31, 23, 59, 30));
        edit.adjust(DateField::Year, Step::Up);
        edit.adjust(DateField::Month, Step::Up);
        edit.adjust(DateField::Hour, Step::Up);
        edit.adjust(DateField::Minute, Step::Up);
        assert_eq!(edit.year, 2000, "year wraps 2099 -> 2000");
        assert_eq!(edit.month, 1, "month wraps 12 -> 1");
        assert_eq!(edit.hour, 0);
        assert_eq!(edit.minute, 0);

        edit.adjust(DateField::Day, Step::Up);
        assert_eq!(edit.day, 1, "day wraps 31 -> 1 in January");
        edit.adjust(DateField::Day, Step::Down);
        assert_eq!(edit.day, 31, "day wraps 1 -> 31 in January");
    }

    #[test]
    fn test_month_change_clamps_day() {
        let mut edit = PendingDateTimeEdit::from(DateTime::new(2023, 1, 31, 8, 0, 0));
        edit.adjust(DateField::Month, Step::Up);
        assert_eq!((edit.month, edit.day), (2, 28), "Jan 31 -> Feb 28 in 2023");
    }

    #[test]
    fn test_commit_zeroes_seconds() {
        let edit = PendingDateTimeEdit::from(DateTime::new(2024, 2, 29, 12, 34, 56));
        let committed = edit.to_datetime();
        assert_eq!(committed, DateTime::new(2024, 2, 29, 12, 34, 0));
        assert!(committed.is_valid());
    }
}
