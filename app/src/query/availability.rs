use crate::core::time::DateRange;
use crate::date_range::Preset;

use super::{DeviceSelection, QueryParams};

/// Availability and error analysis. The backend's detailed logs only reach back about
/// three months, so yearly presets and "all data" are not offered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub device: DeviceSelection,
    pub range: DateRange,
}

impl AvailabilityQuery {
    pub const ALLOWED_PRESETS: [Preset; 7] = [
        Preset::Today,
        Preset::Yesterday,
        Preset::Last7Days,
        Preset::Last30Days,
        Preset::Last3Months,
        Preset::ThisMonth,
        Preset::LastMonth,
    ];

    pub const DEFAULT_PRESET: Preset = Preset::Last3Months;

    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("device_id", &self.device).push_range(&self.range);
        params
    }
}
