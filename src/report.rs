//! Daily report formatting
//!
//! Pure functions turning raw interval durations into the strings stored in
//! the history file.

use chrono::{Datelike, NaiveDate};

use crate::tracking::DurationRecord;

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Whole hours and leftover whole minutes of a total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBreakdown {
    pub hours: u64,
    pub minutes: u64,
}

impl DurationBreakdown {
    pub const fn new(hours: u64, minutes: u64) -> Self {
        Self { hours, minutes }
    }

    /// Leftover seconds are dropped; hours never roll over into days
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_seconds(seconds: f64) -> Self {
        let whole = if seconds.is_finite() && seconds > 0.0 {
            seconds.trunc() as u64
        } else {
            0
        };
        Self {
            hours: whole / SECONDS_PER_HOUR,
            minutes: (whole % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        }
    }
}

/// Sum of every interval, in seconds
pub fn total_seconds(records: &[DurationRecord]) -> f64 {
    records.iter().map(|record| record.duration).sum()
}

const fn pluralize(count: u64, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Display string for a day's total, e.g. `"2 hrs, 30 mins"`
pub fn format_duration(breakdown: DurationBreakdown) -> String {
    let DurationBreakdown { hours, minutes } = breakdown;
    let hrs = pluralize(hours, "hr", "hrs");
    let mins = pluralize(minutes, "min", "mins");

    match (hours, minutes) {
        (0, 0) => "No time tracked".to_string(),
        (0, m) => format!("{m} {mins}"),
        (h, 0) => format!("{h} {hrs}"),
        (h, m) => format!("{h} {hrs}, {m} {mins}"),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long human date, e.g. `"Monday, January 1st, 2024"`
pub fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{}, {} {day}{}, {}",
        date.format("%A"),
        date.format("%B"),
        ordinal_suffix(day),
        date.year()
    )
}

pub fn commit_message(formatted_date: &str) -> String {
    format!("update with time tracked for {formatted_date}")
}
