//! Local wall-clock time and day/night split from a flat UTC offset.
//!
//! No timezone database is consulted: the offset reported by the weather
//! service is added to the current UTC instant and the result is read on a
//! 24-hour clock. DST is only as correct as the offset itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i128 = 86_400;

/// First local hour counted as day.
pub const DAY_START_HOUR: u32 = 6;
/// Last local hour counted as day (inclusive, so 18:59 is still day).
pub const DAY_END_HOUR: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPart {
    Day,
    Night,
}

impl DayPart {
    pub fn from_hour(hour: u32) -> Self {
        if (DAY_START_HOUR..=DAY_END_HOUR).contains(&hour) {
            DayPart::Day
        } else {
            DayPart::Night
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPart::Day => "day",
            DayPart::Night => "night",
        }
    }
}

impl std::fmt::Display for DayPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local hour and minute at the queried city plus the derived day part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalClock {
    pub hour: u32,
    pub minute: u32,
    pub part: DayPart,
}

impl LocalClock {
    /// `HH:mm`, 24-hour.
    pub fn hhmm(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

/// Resolve the local clock for a city `utc_offset_seconds` away from UTC.
///
/// Total for every `i64` offset: the shifted instant is reduced modulo one
/// day, so absurd offsets still land on some hour of a 24-hour clock.
pub fn resolve_day_part(utc_offset_seconds: i64, now_utc: DateTime<Utc>) -> LocalClock {
    let shifted = i128::from(now_utc.timestamp()) + i128::from(utc_offset_seconds);
    let second_of_day = shifted.rem_euclid(SECONDS_PER_DAY) as u32;

    let hour = second_of_day / 3600;
    let minute = (second_of_day % 3600) / 60;

    LocalClock { hour, minute, part: DayPart::from_hour(hour) }
}
