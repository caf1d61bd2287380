use serde::Serialize;
use serde_json::Value;

use crate::adapter::backend::{BackendError, ClicksExport, ClicksReport, RefreshOutcome, TrendPoint};
use crate::core::time::{Clock, Date, DateRange};
use crate::date_range::{DateRangePicker, DateRangeResolver};
use crate::port::DashboardApi;
use crate::query::{ClicksExportQuery, ClicksQuery, DeviceSelection, RefreshQuery, Resolution, YoyQuery};

use super::{PageState, ReportPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearComparison {
    pub current_year: i32,
    pub previous_year: i32,
}

impl YearComparison {
    pub fn for_year(current_year: i32) -> Self {
        Self {
            current_year,
            previous_year: current_year - 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClicksReportPage {
    pub device: DeviceSelection,
    pub one_shot: bool,
    pub resolution: Resolution,
    /// Year-over-year comparison is loaded only while enabled.
    pub year_comparison: Option<YearComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClicksReportData {
    pub report: ClicksReport,
    pub trend: Vec<TrendPoint>,
    pub yoy: Option<Value>,
    pub yoy_trend: Option<Value>,
}

impl ClicksReportPage {
    /// Starts from the archive start up to today as a custom range.
    pub fn into_state<C: Clock>(self, resolver: DateRangeResolver<C>) -> PageState<Self, C> {
        let today = resolver.clock().now().date();
        let mut picker = DateRangePicker::with_all_presets(resolver);
        let default_range = ClicksQuery::default_range(today);

        if let (Some(from), Some(to)) = (default_range.from_date(), default_range.to_date()) {
            picker.select_manual(from, Some(to));
        }

        PageState::new(self, picker)
    }

    pub fn query(&self, range: &DateRange) -> ClicksQuery {
        ClicksQuery {
            device: self.device.clone(),
            one_shot: self.one_shot,
            resolution: self.resolution,
            range: *range,
        }
    }

    async fn load_year_comparison<A: DashboardApi>(
        &self,
        api: &A,
        comparison: YearComparison,
        range: &DateRange,
    ) -> Result<(Value, Value), BackendError> {
        let query = YoyQuery {
            device: self.device.clone(),
            current_year: comparison.current_year,
            previous_year: comparison.previous_year,
            range: *range,
        };
        let params = query.params();

        futures::try_join!(api.clicks_yoy(&params), api.clicks_yoy_trend(&params))
    }
}

impl ReportPage for ClicksReportPage {
    type Data = ClicksReportData;

    const NAME: &'static str = "clicks report";

    async fn load<A: DashboardApi>(&self, api: &A, range: &DateRange, today: Date) -> Result<ClicksReportData, BackendError> {
        let params = self.query(range).params(today);

        let (report, trend) = futures::try_join!(api.clicks_report(&params), api.clicks_trend(&params))?;

        let (yoy, yoy_trend) = match self.year_comparison {
            Some(comparison) => match self.load_year_comparison(api, comparison, range).await {
                Ok((yoy, yoy_trend)) => (Some(yoy), Some(yoy_trend)),
                Err(e) => {
                    tracing::warn!("Error loading year-over-year comparison: {}", e);
                    (None, None)
                }
            },
            None => (None, None),
        };

        Ok(ClicksReportData {
            report,
            trend,
            yoy,
            yoy_trend,
        })
    }
}

impl<C: Clock> PageState<ClicksReportPage, C> {
    /// CSV export of the current selection with its download file name.
    pub async fn export<A: DashboardApi>(&self, api: &A) -> Result<(String, ClicksExport), BackendError> {
        let query = ClicksExportQuery {
            device: self.page().device.clone(),
            one_shot: self.page().one_shot,
            range: *self.range(),
        };

        let export = api.clicks_export(&query.params()).await?;
        Ok((ClicksExportQuery::file_name(self.today()), export))
    }

    /// Asks the backend to pull new data for the current selection, then reloads.
    pub async fn refresh<A: DashboardApi>(&mut self, api: &A, force: bool) -> Result<RefreshOutcome, BackendError> {
        let query = RefreshQuery {
            device: self.page().device.clone(),
            force,
            range: *self.range(),
        };

        let outcome = api.refresh_data(&query.params()).await?;
        tracing::info!("{}", outcome.summary());

        self.reload(api).await;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::date_range::{Preset, PresetState};
    use crate::page::fake::FakeApi;
    use crate::t;

    fn state(page: ClicksReportPage) -> PageState<ClicksReportPage, FixedClock> {
        page.into_state(DateRangeResolver::new(FixedClock::new(t!(2025-06-15, 9:00))))
    }

    #[test]
    fn test_starts_with_archive_range() {
        let state = state(ClicksReportPage::default());

        assert_eq!(state.picker().preset_state(), PresetState::Custom);
        assert_eq!(state.picker().label(), "01.01.2020 - 15.06.2025");
    }

    #[tokio::test]
    async fn test_report_and_trend_share_params() {
        let api = FakeApi::default();
        let mut state = state(ClicksReportPage {
            resolution: Resolution::Month,
            ..Default::default()
        });

        let data = state.reload(&api).await.unwrap();

        assert_eq!(data.report.data_source_label(), "HP Jobs API");
        assert!(data.yoy.is_none());
        assert_eq!(api.calls_to("clicks/report"), api.calls_to("clicks/trend"));
        assert_eq!(api.calls_to("clicks/report")[0].get("resolution"), Some("month"));
        assert!(api.calls_to("clicks/yoy").is_empty());
    }

    #[tokio::test]
    async fn test_all_data_falls_back_to_archive_bounds() {
        let api = FakeApi::default();
        let mut state = state(ClicksReportPage::default());

        state.select_preset(&api, Preset::All).await.unwrap();

        let params = &api.calls_to("clicks/report")[0];
        assert_eq!(params.get("from_date"), Some("2020-01-01"));
        assert_eq!(params.get("to_date"), Some("2025-06-15"));
    }

    #[tokio::test]
    async fn test_year_comparison_keeps_range_optional() {
        let api = FakeApi::default();
        let mut state = state(ClicksReportPage::default());
        state.select_preset(&api, Preset::All).await.unwrap();

        let data = state
            .update(&api, |page| page.year_comparison = Some(YearComparison::for_year(2025)))
            .await
            .unwrap();

        assert!(data.yoy.is_some());
        let params = &api.calls_to("clicks/yoy")[0];
        assert_eq!(params.get("previous_year"), Some("2024"));
        assert!(!params.contains("from_date"));
    }

    #[tokio::test]
    async fn test_year_comparison_failure_keeps_report() {
        let api = FakeApi::failing(&["clicks/yoy/trend"]);
        let mut state = state(ClicksReportPage {
            year_comparison: Some(YearComparison::for_year(2025)),
            ..Default::default()
        });

        let data = state.reload(&api).await.unwrap();

        assert_eq!(data.report.total_impressions, 170);
        assert!(data.yoy.is_none());
    }

    #[tokio::test]
    async fn test_export() {
        let api = FakeApi::default();
        let state = state(ClicksReportPage {
            one_shot: true,
            ..Default::default()
        });

        let (file_name, export) = state.export(&api).await.unwrap();

        assert_eq!(file_name, "clicks_report_2025-06-15.csv");
        assert_eq!(export.rows.len(), 1);
        assert_eq!(api.calls_to("clicks/export")[0].get("is_oneshot"), Some("true"));
    }

    #[tokio::test]
    async fn test_refresh_reloads() {
        let api = FakeApi::default();
        let mut state = state(ClicksReportPage::default());

        let outcome = state.refresh(&api, true).await.unwrap();

        assert_eq!(outcome.summary(), "4 neue Jobs von der API geladen");
        assert_eq!(api.calls_to("data/refresh")[0].get("force"), Some("true"));
        assert_eq!(api.calls_to("clicks/report").len(), 1);
        assert!(state.data().is_some());
    }
}
