use std::{
    fmt::Display,
    ops::{Add, Sub},
};

use anyhow::Context;
use chrono::{LocalResult, TimeZone};

use super::{Date, Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DateTime {
    delegate: chrono::DateTime<chrono::Local>,
}

impl DateTime {
    fn new<T: chrono::TimeZone>(delegate: chrono::DateTime<T>) -> Self {
        Self {
            delegate: delegate.with_timezone(&chrono::Local),
        }
    }

    /// Interprets a wall-clock time in the local timezone. Ambiguous times (clock falling back)
    /// resolve to the earlier instant, times skipped by a DST jump move forward out of the gap.
    pub(super) fn from_local(naive: chrono::NaiveDateTime) -> Self {
        match chrono::Local.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.into(),
            LocalResult::Ambiguous(earliest, _) => earliest.into(),
            LocalResult::None => Self::from_local(naive + chrono::Duration::minutes(30)),
        }
    }

    pub fn now() -> Self {
        chrono::Local::now().into()
    }

    pub fn from_iso(iso8601: &str) -> anyhow::Result<Self> {
        Ok(chrono::DateTime::parse_from_rfc3339(iso8601)
            .with_context(|| format!("Error parsing date-time {}", iso8601))?
            .into())
    }

    pub fn date(&self) -> Date {
        Date::new(self.delegate.date_naive())
    }

    pub fn start_of_day(&self) -> Self {
        self.date().start_of_day()
    }

    pub fn end_of_day(&self) -> Self {
        self.date().end_of_day()
    }

    /// Full calendar days since `since`, in local time. A DST change in between does not
    /// shorten the count, a day is only incomplete if the time of day is not reached yet.
    pub fn calendar_days_since(&self, since: &Self) -> i64 {
        let days = since.date().days_until(&self.date());
        let time = self.naive_local().time();
        let since_time = since.naive_local().time();

        if days > 0 && time < since_time {
            days - 1
        } else if days < 0 && time > since_time {
            days + 1
        } else {
            days
        }
    }

    pub fn naive_local(&self) -> chrono::NaiveDateTime {
        self.delegate.naive_local()
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.delegate.format("%d.%m.%Y %H:%M:%S"))
    }
}

impl Add<Duration> for DateTime {
    type Output = DateTime;

    fn add(self, rhs: Duration) -> Self::Output {
        Self::new(self.delegate + rhs.delegate)
    }
}

impl Sub<Duration> for DateTime {
    type Output = DateTime;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self::new(self.delegate - rhs.delegate)
    }
}

impl<T: chrono::TimeZone> From<chrono::DateTime<T>> for DateTime {
    fn from(val: chrono::DateTime<T>) -> Self {
        DateTime::new(val)
    }
}
