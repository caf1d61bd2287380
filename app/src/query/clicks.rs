use std::{fmt::Display, str::FromStr};

use anyhow::bail;
use chrono::NaiveDate;

use crate::core::time::{Date, DateRange};

use super::{DeviceSelection, QueryParams};

const ARCHIVE_START: NaiveDate = match NaiveDate::from_ymd_opt(2020, 1, 1) {
    Some(date) => date,
    None => panic!("invalid archive start"),
};

/// First day of the click archive. The clicks report asks for everything since then when
/// no lower bound is selected.
pub fn archive_start() -> Date {
    ARCHIVE_START.into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    #[default]
    Day,
    Month,
    Year,
}

impl Resolution {
    pub fn id(&self) -> &'static str {
        match self {
            Resolution::Day => "day",
            Resolution::Month => "month",
            Resolution::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Day => "Täglich",
            Resolution::Month => "Monatlich",
            Resolution::Year => "Jährlich",
        }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Resolution {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Resolution::Day),
            "month" => Ok(Resolution::Month),
            "year" => Ok(Resolution::Year),
            _ => bail!("Unknown resolution {:?}, expected day, month or year", s),
        }
    }
}

/// Click report and trend. Unlike the other pages, missing bounds are replaced by the
/// archive start and today.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClicksQuery {
    pub device: DeviceSelection,
    pub one_shot: bool,
    pub resolution: Resolution,
    pub range: DateRange,
}

impl ClicksQuery {
    /// Range the clicks page starts with.
    pub fn default_range(today: Date) -> DateRange {
        DateRange::for_days(archive_start(), today)
    }

    pub fn params(&self, today: Date) -> QueryParams {
        let mut params = QueryParams::new();

        params
            .push("device_id", &self.device)
            .push_flag("is_oneshot", self.one_shot)
            .push("resolution", self.resolution)
            .push_range_or(&self.range, archive_start(), today);

        params
    }
}

/// Year-over-year comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoyQuery {
    pub device: DeviceSelection,
    pub current_year: i32,
    pub previous_year: i32,
    pub range: DateRange,
}

impl YoyQuery {
    pub fn for_year(device: DeviceSelection, current_year: i32, range: DateRange) -> Self {
        Self {
            device,
            current_year,
            previous_year: current_year - 1,
            range,
        }
    }

    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();

        params
            .push("device_id", &self.device)
            .push("current_year", self.current_year)
            .push("previous_year", self.previous_year)
            .push_range(&self.range);

        params
    }
}

/// CSV export of the click report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClicksExportQuery {
    pub device: DeviceSelection,
    pub one_shot: bool,
    pub range: DateRange,
}

impl ClicksExportQuery {
    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();

        params
            .push("device_id", &self.device)
            .push_flag("is_oneshot", self.one_shot)
            .push_range(&self.range);

        params
    }

    pub fn file_name(today: Date) -> String {
        format!("clicks_report_{}.csv", today.to_query_string())
    }
}

/// Pulls new jobs from the vendor API into the backend. `force` bypasses the backend's
/// own freshness check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshQuery {
    pub device: DeviceSelection,
    pub force: bool,
    pub range: DateRange,
}

impl RefreshQuery {
    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();

        params
            .push("device_id", &self.device)
            .push("force", self.force)
            .push_range(&self.range);

        params
    }
}
