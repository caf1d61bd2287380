#![allow(async_fn_in_trait)]

//! Report pages as plain state containers. A page owns its filters and a date range
//! picker, every change reloads the page's data from the backend and replaces it as a
//! whole. Requests are neither cancelled nor ordered.

mod availability;
mod clicks;
mod dashboard;
pub mod devices;
pub mod history;
mod jobs;

#[cfg(test)]
mod fake;

pub use availability::AvailabilityPage;
pub use clicks::{ClicksReportData, ClicksReportPage, YearComparison};
pub use dashboard::{DashboardData, DashboardPage};
pub use jobs::JobsPage;

use crate::adapter::backend::BackendError;
use crate::core::time::{Clock, Date, DateRange, SystemClock};
use crate::date_range::{DateRangePicker, Preset, UnknownPresetError};
use crate::port::DashboardApi;

pub trait ReportPage {
    type Data;

    const NAME: &'static str;

    async fn load<A: DashboardApi>(&self, api: &A, range: &DateRange, today: Date) -> Result<Self::Data, BackendError>;

    /// Called before reloading after the date range changed.
    fn on_range_changed(&mut self) {}
}

/// Why the last load failed. Transient failures (network, rate limit, server errors) are
/// worth retrying as they are, anything else needs a different request or a fix.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{message}")]
pub struct PageError {
    pub message: String,
    pub transient: bool,
}

impl From<&BackendError> for PageError {
    fn from(error: &BackendError) -> Self {
        Self {
            message: error.to_string(),
            transient: error.is_transient(),
        }
    }
}

pub struct PageState<P: ReportPage, C = SystemClock> {
    page: P,
    picker: DateRangePicker<C>,
    data: Option<P::Data>,
    error: Option<PageError>,
}

impl<P: ReportPage, C: Clock> PageState<P, C> {
    pub fn new(page: P, picker: DateRangePicker<C>) -> Self {
        Self {
            page,
            picker,
            data: None,
            error: None,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn picker(&self) -> &DateRangePicker<C> {
        &self.picker
    }

    /// Direct access to the picker. Changes made here take effect with the next reload.
    pub fn picker_mut(&mut self) -> &mut DateRangePicker<C> {
        &mut self.picker
    }

    pub fn range(&self) -> &DateRange {
        self.picker.range()
    }

    pub fn data(&self) -> Option<&P::Data> {
        self.data.as_ref()
    }

    /// Last failed load, cleared by the next successful one.
    pub fn error(&self) -> Option<&PageError> {
        self.error.as_ref()
    }

    pub fn today(&self) -> Date {
        self.picker.resolver().clock().now().date()
    }

    pub async fn reload<A: DashboardApi>(&mut self, api: &A) -> Option<&P::Data> {
        let today = self.today();

        match self.page.load(api, self.picker.range(), today).await {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Loading {} failed: {}", P::NAME, e);
                self.data = None;
                self.error = Some(PageError::from(&e));
            }
        }

        self.data.as_ref()
    }

    pub async fn select_preset<A: DashboardApi>(&mut self, api: &A, preset: Preset) -> Result<(), UnknownPresetError> {
        self.picker.select_preset(preset)?;
        self.range_changed(api).await;
        Ok(())
    }

    pub async fn select_preset_by_name<A: DashboardApi>(&mut self, api: &A, name: &str) -> Result<(), UnknownPresetError> {
        self.picker.select_preset_by_name(name)?;
        self.range_changed(api).await;
        Ok(())
    }

    pub async fn select_manual<A: DashboardApi>(&mut self, api: &A, start: Date, end: Option<Date>) {
        self.picker.select_manual(start, end);
        self.range_changed(api).await;
    }

    pub async fn set_range<A: DashboardApi>(&mut self, api: &A, range: DateRange) {
        self.picker.set_range(range);
        self.range_changed(api).await;
    }

    /// Applies a filter change to the page and reloads.
    pub async fn update<A: DashboardApi>(&mut self, api: &A, change: impl FnOnce(&mut P)) -> Option<&P::Data> {
        change(&mut self.page);
        self.reload(api).await
    }

    async fn range_changed<A: DashboardApi>(&mut self, api: &A) {
        self.page.on_range_changed();
        self.reload(api).await;
    }
}
