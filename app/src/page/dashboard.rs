use serde::Serialize;

use crate::adapter::backend::{BackendError, DailyImpressions, JobSyncOutcome, StatsOverview};
use crate::core::time::{Clock, Date, DateRange};
use crate::date_range::{DateRangePicker, DateRangeResolver};
use crate::port::DashboardApi;
use crate::query::{DeviceSelection, JobSyncQuery, OverviewQuery};

use super::{PageState, ReportPage};

#[derive(Debug, Clone, Default)]
pub struct DashboardPage {
    pub device: DeviceSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub stats: StatsOverview,
    pub performance: Vec<DailyImpressions>,
}

impl DashboardPage {
    pub fn new(device: DeviceSelection) -> Self {
        Self { device }
    }

    /// Starts with all data and offers every preset.
    pub fn into_state<C: Clock>(self, resolver: DateRangeResolver<C>) -> PageState<Self, C> {
        PageState::new(self, DateRangePicker::with_all_presets(resolver))
    }

    pub fn query(&self, range: &DateRange) -> OverviewQuery {
        OverviewQuery {
            device: self.device.clone(),
            range: *range,
        }
    }
}

impl ReportPage for DashboardPage {
    type Data = DashboardData;

    const NAME: &'static str = "dashboard";

    async fn load<A: DashboardApi>(&self, api: &A, range: &DateRange, _today: Date) -> Result<DashboardData, BackendError> {
        let params = self.query(range).params();

        let stats = api.stats_overview(&params).await?;

        // the chart is optional, stats alone are still worth showing
        let performance = match api.clicks_trend(&params).await {
            Ok(trend) => trend.iter().map(DailyImpressions::from_trend).collect(),
            Err(e) => {
                tracing::warn!("Error loading impression trend: {}", e);
                vec![]
            }
        };

        Ok(DashboardData { stats, performance })
    }
}

impl<C: Clock> PageState<DashboardPage, C> {
    /// Starts or stops the backend's periodic job sync.
    pub async fn set_background_sync<A: DashboardApi>(&self, api: &A, running: bool) -> Result<&'static str, BackendError> {
        if running {
            api.start_sync().await?;
            Ok("Background Sync gestartet - Alle 35 Sek. werden neue Jobs synchronisiert")
        } else {
            api.stop_sync().await?;
            Ok("Background Sync gestoppt")
        }
    }

    /// Syncs the selected press right away and reloads on success.
    pub async fn sync_jobs<A: DashboardApi>(&mut self, api: &A) -> Result<JobSyncOutcome, BackendError> {
        let query = JobSyncQuery {
            device: self.page().device.clone(),
        };

        let outcome = api.sync_jobs(&query.params()).await?;
        tracing::info!("{}", outcome.summary());

        self.reload(api).await;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::page::fake::FakeApi;
    use crate::t;

    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn state() -> PageState<DashboardPage, FixedClock> {
        DashboardPage::new(DeviceSelection::device("47100122"))
            .into_state(DateRangeResolver::new(FixedClock::new(t!(2025-06-15, 9:00))))
    }

    #[tokio::test]
    async fn test_stats_and_trend_share_params() {
        let api = FakeApi::default();
        let mut state = state();

        state.reload(&api).await;

        assert_eq!(api.calls_to("stats/overview"), api.calls_to("clicks/trend"));
        assert_eq!(api.calls_to("clicks/trend")[0].get("device_id"), Some("47100122"));
    }

    #[tokio::test]
    async fn test_performance_sums_categories() {
        let api = FakeApi::default();
        let mut state = state();

        let data = state.reload(&api).await.unwrap();

        assert_json_eq!(
            data.performance,
            json!([
                { "date": "2025-06-14", "impressions": 120.0 },
                { "date": "2025-06-15", "impressions": 50.0 }
            ])
        );
    }

    #[tokio::test]
    async fn test_trend_failure_keeps_stats() {
        let api = FakeApi::failing(&["clicks/trend"]);
        let mut state = state();

        let data = state.reload(&api).await.unwrap();

        assert_eq!(data.stats.total_jobs, 12);
        assert!(data.performance.is_empty());
    }

    #[tokio::test]
    async fn test_background_sync_toggle() {
        let api = FakeApi::default();
        let state = state();

        let started = state.set_background_sync(&api, true).await.unwrap();
        let stopped = state.set_background_sync(&api, false).await.unwrap();

        assert!(started.starts_with("Background Sync gestartet"));
        assert_eq!(stopped, "Background Sync gestoppt");
        assert_eq!(api.calls_to("sync/start").len(), 1);
        assert_eq!(api.calls_to("sync/stop").len(), 1);
    }

    #[tokio::test]
    async fn test_job_sync_for_all_presses_uses_default_press() {
        let api = FakeApi::default();
        let mut state = DashboardPage::default().into_state(DateRangeResolver::new(FixedClock::new(t!(2025-06-15, 9:00))));

        let outcome = state.sync_jobs(&api).await.unwrap();

        assert_eq!(outcome.summary(), "3 Jobs synchronisiert");
        assert_eq!(api.calls_to("jobs/sync")[0].get("device_id"), Some("47100122"));
        assert_eq!(api.calls_to("stats/overview").len(), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_job_sync_does_not_reload() {
        let api = FakeApi::rejecting(&["jobs/sync"], 429);
        let mut state = state();

        let result = state.sync_jobs(&api).await;

        assert!(matches!(result, Err(BackendError::RateLimited)));
        assert!(api.calls_to("stats/overview").is_empty());
    }
}
