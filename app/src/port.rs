#![allow(async_fn_in_trait)]

use serde_json::Value;

use crate::adapter::backend::{
    BackendError, ClicksExport, ClicksReport, Device, JobList, JobSyncOutcome, LogPage, NewDevice, RefreshOutcome,
    StatsOverview, SyncStatus, TrendPoint,
};
use crate::query::QueryParams;

/// Read and refresh operations of the dashboard backend, as seen by the report pages.
pub trait DashboardApi {
    async fn stats_overview(&self, params: &QueryParams) -> Result<StatsOverview, BackendError>;

    async fn clicks_trend(&self, params: &QueryParams) -> Result<Vec<TrendPoint>, BackendError>;

    async fn clicks_report(&self, params: &QueryParams) -> Result<ClicksReport, BackendError>;

    async fn clicks_yoy(&self, params: &QueryParams) -> Result<Value, BackendError>;

    async fn clicks_yoy_trend(&self, params: &QueryParams) -> Result<Value, BackendError>;

    async fn clicks_export(&self, params: &QueryParams) -> Result<ClicksExport, BackendError>;

    async fn jobs(&self, params: &QueryParams) -> Result<JobList, BackendError>;

    async fn availability(&self, params: &QueryParams) -> Result<Value, BackendError>;

    async fn refresh_data(&self, params: &QueryParams) -> Result<RefreshOutcome, BackendError>;

    async fn devices(&self) -> Result<Vec<Device>, BackendError>;

    async fn device_status(&self, device_id: &str) -> Result<Value, BackendError>;

    async fn sync_status(&self) -> Result<SyncStatus, BackendError>;

    async fn start_sync(&self) -> Result<Value, BackendError>;

    async fn stop_sync(&self) -> Result<Value, BackendError>;

    async fn sync_jobs(&self, params: &QueryParams) -> Result<JobSyncOutcome, BackendError>;

    async fn import_log(&self, params: &QueryParams) -> Result<LogPage, BackendError>;

    async fn sync_log(&self, params: &QueryParams) -> Result<LogPage, BackendError>;

    async fn add_device(&self, device: &NewDevice) -> Result<Value, BackendError>;

    async fn remove_device(&self, device_id: &str) -> Result<Value, BackendError>;
}
