use serde_json::Value;

use crate::adapter::backend::BackendError;
use crate::core::time::{Clock, Date, DateRange};
use crate::date_range::{DateRangePicker, DateRangeResolver, LookbackAdvisory, lookback_advisory};
use crate::port::DashboardApi;
use crate::query::{AvailabilityQuery, DeviceSelection};

use super::{PageState, ReportPage};

#[derive(Debug, Clone, Default)]
pub struct AvailabilityPage {
    pub device: DeviceSelection,
}

impl AvailabilityPage {
    pub fn new(device: DeviceSelection) -> Self {
        Self { device }
    }

    /// Offers only presets within the detailed log retention, starting with the last
    /// three months.
    pub fn into_state<C: Clock>(self, resolver: DateRangeResolver<C>) -> PageState<Self, C> {
        let picker = DateRangePicker::new(
            resolver,
            &AvailabilityQuery::ALLOWED_PRESETS,
            AvailabilityQuery::DEFAULT_PRESET,
        );
        PageState::new(self, picker)
    }
}

impl ReportPage for AvailabilityPage {
    type Data = Value;

    const NAME: &'static str = "availability analysis";

    async fn load<A: DashboardApi>(&self, api: &A, range: &DateRange, _today: Date) -> Result<Value, BackendError> {
        let query = AvailabilityQuery {
            device: self.device.clone(),
            range: *range,
        };

        api.availability(&query.params()).await
    }
}

impl<C: Clock> PageState<AvailabilityPage, C> {
    /// Shown next to the picker when a manual selection reaches past the retained logs.
    pub fn advisory(&self) -> Option<LookbackAdvisory> {
        lookback_advisory(self.range(), self.picker().resolver().clock())
    }
}
