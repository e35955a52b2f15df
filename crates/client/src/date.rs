//! Resolution of user supplied date tokens into calendar dates.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Wire format of the `f`/`t` query parameters.
pub const LAYOUT: &str = "%Y-%m-%d";

const DATE_FORMATS: &[&str] = &[
    "%Y%m%d",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d-%b-%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Turns tokens such as `today`, `ytd` or `2018-12-01` into dates relative
/// to a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct DateResolver {
    today: NaiveDate,
}

impl DateResolver {
    /// Resolver anchored at the local date at the time of the call.
    pub fn new() -> Self {
        Self::at(Local::now().date_naive())
    }

    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Resolve `token`. Empty means today. Tokens that match neither a
    /// keyword nor a known format are rejected.
    pub fn resolve(&self, token: &str) -> Result<NaiveDate> {
        let token = token.trim();
        match token.to_ascii_lowercase().as_str() {
            "" | "today" => return Ok(self.today),
            "tomorrow" | "tmw" => return self.shift(1),
            "yesterday" | "ytd" => return self.shift(-1),
            _ => {}
        }
        lenient(token)
            .or_else(|| NaiveDate::parse_from_str(token, LAYOUT).ok())
            .ok_or_else(|| Error::InvalidDate(token.to_string()))
    }

    fn shift(&self, days: i64) -> Result<NaiveDate> {
        let delta = Days::new(days.unsigned_abs());
        let shifted = if days < 0 {
            self.today.checked_sub_days(delta)
        } else {
            self.today.checked_add_days(delta)
        };
        shifted.ok_or_else(|| Error::InvalidDate(format!("{days:+} days from {}", self.today)))
    }
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn lenient(token: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(token, f).ok())
    {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(token) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(token, f).ok())
        .map(|dt| dt.date())
}
