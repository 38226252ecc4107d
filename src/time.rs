//! Clock-time parsing and formatting for timetable slots: `HH:MM` wire form,
//! minutes-since-midnight arithmetic, 12-hour display rendering.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time {0:?}: expected HH:MM with hour 00-23 and minute 00-59")]
pub struct ParseTimeError(pub String);

/// A naive wall-clock time within one day, minute resolution.
///
/// Construction is validated: parsing rejects anything that is not a
/// well-formed `HH:MM` in range, so downstream arithmetic never sees
/// garbage minute counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn parse(s: &str) -> Result<Self, ParseTimeError> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(ClockTime)
            .map_err(|_| ParseTimeError(s.to_string()))
    }

    pub fn from_minutes(total: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(total / 60, total % 60, 0).map(ClockTime)
    }

    /// Minutes since 00:00, in `0..1440`.
    pub fn minutes(self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }

    /// Shift forward within the same day; `None` once the result would
    /// reach or pass midnight, for any offset up to `u32::MAX`.
    pub fn checked_add_minutes(self, offset: u32) -> Option<Self> {
        self.minutes()
            .checked_add(offset)
            .and_then(Self::from_minutes)
    }

    /// 24-hour zero-padded form, e.g. `"08:05"`.
    pub fn hhmm(self) -> String {
        self.0.format("%H:%M").to_string()
    }

    /// 12-hour display form, e.g. `"8:05 AM"`; midnight is 12 AM, noon 12 PM.
    pub fn display_12h(self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }
}

/// `"8:00 AM - 8:40 AM"` rendering used for a period's display slot.
pub fn display_span(start: ClockTime, end: ClockTime) -> String {
    format!("{} - {}", start.display_12h(), end.display_12h())
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hhmm())
    }
}

impl FromStr for ClockTime {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ParseTimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.hhmm()
    }
}
