use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

/// A date at day granularity. Time-of-day is dropped on construction, so
/// equality and ordering only ever see the calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and RFC 3339 timestamps.
    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        let input = input.trim();

        if let Ok(date) = NaiveDate::parse_from_str(input, ISO_DATE_FORMAT) {
            return Ok(Self(date));
        }
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, ISO_DATETIME_FORMAT) {
            return Ok(datetime.into());
        }
        DateTime::parse_from_rfc3339(input)
            .map(|datetime| Self(datetime.date_naive()))
            .map_err(|_| DateParseError::InvalidDate(input.to_string()))
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// 0 = Sunday .. 6 = Saturday
    pub fn weekday_index(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year(),
            month: self.month(),
        }
    }

    pub fn add_days(&self, days: i64) -> Option<Self> {
        self.0
            .checked_add_signed(chrono::Duration::days(days))
            .map(Self)
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<NaiveDateTime> for CalendarDate {
    fn from(datetime: NaiveDateTime) -> Self {
        Self(datetime.date())
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

/// Reference month for a calendar page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        let invalid = || DateParseError::InvalidMonth(input.to_string());
        let (year, month) = input.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }

    pub fn first_day(&self) -> CalendarDate {
        CalendarDate(
            NaiveDate::from_ymd_opt(self.year, self.month, 1)
                .unwrap_or(NaiveDate::MIN),
        )
    }

    pub fn last_day(&self) -> CalendarDate {
        match self.next() {
            Some(next) => next.first_day().pred().unwrap_or(next.first_day()),
            None => CalendarDate(NaiveDate::MAX),
        }
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Blank cells before day 1 in a Sunday-first grid. Always in `0..=6`.
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday_index()
    }

    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn prev(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn day(&self, day: u32) -> Option<CalendarDate> {
        CalendarDate::from_ymd(self.year, self.month, day)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year_month() == *self
    }

    pub fn title(&self) -> String {
        self.first_day().naive().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
