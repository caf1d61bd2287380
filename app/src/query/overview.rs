use crate::core::time::DateRange;

use super::{DeviceSelection, QueryParams};

/// Dashboard overview: stats and impression trend for one device or all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverviewQuery {
    pub device: DeviceSelection,
    pub range: DateRange,
}

impl OverviewQuery {
    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("device_id", &self.device).push_range(&self.range);
        params
    }
}
