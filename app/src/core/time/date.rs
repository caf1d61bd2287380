use std::{fmt::Display, str::FromStr};

use anyhow::Context;
use chrono::{Datelike, Months};

use super::DateTime;

const QUERY_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// A calendar day in local time, without time-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Date {
    delegate: chrono::NaiveDate,
}

impl Date {
    pub(super) fn new(delegate: chrono::NaiveDate) -> Self {
        Self { delegate }
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> anyhow::Result<Self> {
        Ok(Self::new(
            chrono::NaiveDate::from_ymd_opt(year, month, day)
                .with_context(|| format!("Invalid date {:04}-{:02}-{:02}", year, month, day))?,
        ))
    }

    pub fn year(&self) -> i32 {
        self.delegate.year()
    }

    pub fn month(&self) -> u32 {
        self.delegate.month()
    }

    pub fn day(&self) -> u32 {
        self.delegate.day()
    }

    //the checked operations below fail only at the edges of what can be stored in a date,
    //saturating there is good enough

    pub fn minus_days(&self, days: u64) -> Self {
        Self::new(
            self.delegate
                .checked_sub_days(chrono::Days::new(days))
                .unwrap_or(chrono::NaiveDate::MIN),
        )
    }

    /// Calendar months back. The day is clamped to the length of the target month,
    /// so 31 May minus three months is the last day of February.
    pub fn minus_months(&self, months: u32) -> Self {
        Self::new(
            self.delegate
                .checked_sub_months(Months::new(months))
                .unwrap_or(chrono::NaiveDate::MIN),
        )
    }

    pub fn minus_years(&self, years: u32) -> Self {
        self.minus_months(years.saturating_mul(12))
    }

    pub fn first_of_month(&self) -> Self {
        Self::new(self.delegate.with_day(1).unwrap_or(self.delegate))
    }

    pub fn last_of_month(&self) -> Self {
        let last = self
            .first_of_month()
            .delegate
            .checked_add_months(Months::new(1))
            .and_then(|next_month| next_month.pred_opt())
            .unwrap_or(chrono::NaiveDate::MAX);

        Self::new(last)
    }

    pub fn first_of_year(&self) -> Self {
        Self::new(self.delegate.with_ordinal(1).unwrap_or(self.delegate))
    }

    pub fn last_of_year(&self) -> Self {
        Self::new(
            chrono::NaiveDate::from_ymd_opt(self.year(), 12, 31).unwrap_or(chrono::NaiveDate::MAX),
        )
    }

    /// 00:00:00.000 local time
    pub fn start_of_day(&self) -> DateTime {
        DateTime::from_local(self.delegate.and_time(chrono::NaiveTime::MIN))
    }

    /// 23:59:59.999 local time
    pub fn end_of_day(&self) -> DateTime {
        let midnight = self.delegate.and_time(chrono::NaiveTime::MIN);
        DateTime::from_local(midnight + chrono::Duration::days(1) - chrono::Duration::milliseconds(1))
    }

    /// Whole days from `self` to `other`, negative if `other` is earlier.
    pub fn days_until(&self, other: &Date) -> i64 {
        other.delegate.signed_duration_since(self.delegate).num_days()
    }

    /// `yyyy-MM-dd`, the format of the backend's `from_date`/`to_date` parameters
    pub fn to_query_string(&self) -> String {
        self.delegate.format(QUERY_FORMAT).to_string()
    }

    /// `dd.mm.yyyy`
    pub fn to_display_string(&self) -> String {
        self.delegate.format(DISPLAY_FORMAT).to_string()
    }
}

impl From<chrono::NaiveDate> for Date {
    fn from(delegate: chrono::NaiveDate) -> Self {
        Self::new(delegate)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

/// Accepts both the query format (`2025-01-31`) and the display format (`31.01.2025`).
impl FromStr for Date {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        chrono::NaiveDate::parse_from_str(s, QUERY_FORMAT)
            .or_else(|_| chrono::NaiveDate::parse_from_str(s, DISPLAY_FORMAT))
            .map(Self::new)
            .with_context(|| format!("Error parsing date {}, expected yyyy-mm-dd or dd.mm.yyyy", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t;

    #[test]
    fn test_minus_months_clamps_to_month_end() {
        assert_eq!(t!(2025-05-31).minus_months(3), t!(2025-02-28));
        assert_eq!(t!(2024-05-31).minus_months(3), t!(2024-02-29));
        assert_eq!(t!(2025-06-15).minus_months(3), t!(2025-03-15));
    }

    #[test]
    fn test_minus_months_across_year() {
        assert_eq!(t!(2025-01-15).minus_months(1), t!(2024-12-15));
    }

    #[test]
    fn test_minus_years_on_leap_day() {
        assert_eq!(t!(2024-02-29).minus_years(1), t!(2023-02-28));
    }

    #[test]
    fn test_minus_days() {
        assert_eq!(t!(2025-03-03).minus_days(7), t!(2025-02-24));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(t!(2025-06-15).first_of_month(), t!(2025-06-01));
        assert_eq!(t!(2025-06-15).last_of_month(), t!(2025-06-30));
        assert_eq!(t!(2024-02-10).last_of_month(), t!(2024-02-29));
        assert_eq!(t!(2025-12-24).last_of_month(), t!(2025-12-31));
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(t!(2025-06-15).first_of_year(), t!(2025-01-01));
        assert_eq!(t!(2025-06-15).last_of_year(), t!(2025-12-31));
    }

    #[test]
    fn test_formats() {
        let date = t!(2025-01-05);

        assert_eq!(date.to_query_string(), "2025-01-05");
        assert_eq!(date.to_display_string(), "05.01.2025");
    }

    #[test]
    fn test_parse_both_formats() {
        assert_eq!("2025-01-31".parse::<Date>().unwrap(), t!(2025-01-31));
        assert_eq!("31.01.2025".parse::<Date>().unwrap(), t!(2025-01-31));
        assert!("31/01/2025".parse::<Date>().is_err());
        assert!("2025-02-30".parse::<Date>().is_err());
    }

    #[test]
    fn test_days_until() {
        assert_eq!(t!(2025-01-01).days_until(&t!(2025-01-31)), 30);
        assert_eq!(t!(2025-01-31).days_until(&t!(2025-01-01)), -30);
    }

    #[test]
    fn test_invalid_ymd() {
        assert!(Date::ymd(2025, 2, 29).is_err());
    }
}
