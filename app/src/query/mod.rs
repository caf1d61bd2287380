//! Query parameters derived from page state. A missing range bound never turns into a
//! parameter: absence means "no limit" to the backend.

mod availability;
mod clicks;
mod device;
mod jobs;
mod overview;
mod sync;

pub use availability::AvailabilityQuery;
pub use clicks::{ClicksExportQuery, ClicksQuery, RefreshQuery, Resolution, YoyQuery, archive_start};
pub use device::{ALL_DEVICES_ID, ALL_DEVICES_LABEL, DeviceSelection};
pub use jobs::JobsQuery;
pub use overview::OverviewQuery;
pub use sync::{DEFAULT_SYNC_DEVICE, HISTORY_LIMIT, HistoryQuery, JobSyncQuery};

use crate::core::time::{Date, DateRange};

pub const FROM_DATE: &str = "from_date";
pub const TO_DATE: &str = "to_date";

/// Ordered query string parameters, serializable straight into a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.0.push((key, value.to_string()));
        self
    }

    pub fn push_opt<V: ToString>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Only adds `key=true`, a false flag is left out.
    pub fn push_flag(&mut self, key: &'static str, flag: bool) -> &mut Self {
        if flag {
            self.push(key, true);
        }
        self
    }

    pub fn push_range(&mut self, range: &DateRange) -> &mut Self {
        self.push_opt(FROM_DATE, range.from_date().map(|d| d.to_query_string()))
            .push_opt(TO_DATE, range.to_date().map(|d| d.to_query_string()))
    }

    /// Like [`push_range`](Self::push_range), substituting defaults for missing bounds.
    pub fn push_range_or(&mut self, range: &DateRange, default_from: Date, default_to: Date) -> &mut Self {
        let from = range.from_date().unwrap_or(default_from);
        let to = range.to_date().unwrap_or(default_to);

        self.push(FROM_DATE, from.to_query_string())
            .push(TO_DATE, to.to_query_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(k, _)| *k)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Filter select boxes use `all` for "no filter".
pub(crate) fn filter_value(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != "all")
}
