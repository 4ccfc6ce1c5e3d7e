//! Daily challenge: one shared level per calendar day
//!
//! The seed is the FNV-1a hash of the `YYYY-MM-DD` date string, so every
//! player gets the same board on the same day. Challenge numbers count days
//! from [`DAILY_EPOCH`](crate::types::DAILY_EPOCH), starting at 1.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash::fnv1a64_str;
use crate::level::{generate_level, Level};
use crate::types::{Difficulty, DAILY_EPOCH};

/// Difficulty every daily challenge is generated at
pub const DAILY_DIFFICULTY: Difficulty = Difficulty::Medium;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("expected a YYYY-MM-DD date, got {0:?}")]
    Format(String),
    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    OutOfRange { year: i32, month: u8, day: u8 },
}

/// A proleptic Gregorian calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        if !(1..=9999).contains(&year)
            || !(1..=12).contains(&month)
            || day == 0
            || day > days_in_month(year, month)
        {
            return Err(DateError::OutOfRange { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Days since 1970-01-01 (negative before it)
    pub fn to_unix_days(&self) -> i64 {
        let m = i64::from(self.month);
        let d = i64::from(self.day);
        let y = i64::from(self.year) - i64::from(m <= 2);

        let era = y.div_euclid(400);
        let yoe = y - era * 400;
        let mp = (m + 9) % 12;
        let doy = (153 * mp + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    /// Inverse of [`CalendarDate::to_unix_days`].
    ///
    /// Returns an error when the day falls outside years 1..=9999.
    pub fn from_unix_days(days: i64) -> Result<Self, DateError> {
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);

        let year = i32::try_from(year).unwrap_or(i32::MAX);
        Self::new(year, month as u8, day as u8)
    }

    /// Signed number of days from `self` to `other`
    pub fn days_until(&self, other: &CalendarDate) -> i64 {
        other.to_unix_days() - self.to_unix_days()
    }

    /// The following day
    pub fn succ(&self) -> Result<Self, DateError> {
        Self::from_unix_days(self.to_unix_days() + 1)
    }

    /// The first daily challenge date
    pub fn epoch() -> Self {
        let (year, month, day) = DAILY_EPOCH;
        Self { year, month, day }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || DateError::Format(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(format_err());
        }
        let digits = |range: std::ops::Range<usize>| -> Result<u32, DateError> {
            let part = &s[range];
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format_err());
            }
            part.parse().map_err(|_| format_err())
        };

        let year = digits(0..4)?;
        let month = digits(5..7)?;
        let day = digits(8..10)?;
        // Two-digit fields always fit in u8.
        Self::new(year as i32, month as u8, day as u8)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Seed for the challenge on `date`, given as `YYYY-MM-DD`
pub fn daily_seed(date: &str) -> u64 {
    fnv1a64_str(date)
}

/// 1-based challenge number; dates before the epoch give 0 or less
pub fn challenge_number(date: &CalendarDate) -> i64 {
    CalendarDate::epoch().days_until(date) + 1
}

/// The level shared by every player on one day
#[derive(Debug, Clone)]
pub struct DailyChallenge {
    pub date: CalendarDate,
    pub seed: u64,
    pub number: i64,
    pub level: Level,
}

impl DailyChallenge {
    pub fn for_date(date: CalendarDate) -> Self {
        let seed = daily_seed(&date.to_string());
        let level = generate_level(DAILY_DIFFICULTY, seed);
        log::info!(
            "daily challenge #{} for {} (seed {:#018x})",
            challenge_number(&date),
            date,
            seed
        );
        Self {
            date,
            seed,
            number: challenge_number(&date),
            level,
        }
    }
}
