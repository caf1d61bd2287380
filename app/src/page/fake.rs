use std::cell::RefCell;

use serde_json::{Value, json};

use crate::adapter::backend::{
    BackendError, ClicksExport, ClicksReport, Device, JobList, JobSyncOutcome, LogPage, NewDevice, RefreshOutcome,
    StatsOverview, SyncStatus, TrendPoint,
};
use crate::port::DashboardApi;
use crate::query::QueryParams;

/// Records every request and answers with canned data. Endpoints listed in `failing`
/// respond with a server error.
#[derive(Default)]
pub struct FakeApi {
    calls: RefCell<Vec<(&'static str, QueryParams)>>,
    failing: Vec<&'static str>,
    failure_status: Option<u16>,
    devices: RefCell<Vec<Device>>,
}

impl FakeApi {
    pub fn failing(endpoints: &[&'static str]) -> Self {
        Self {
            failing: endpoints.to_vec(),
            ..Default::default()
        }
    }

    pub fn rejecting(endpoints: &[&'static str], status: u16) -> Self {
        Self {
            failing: endpoints.to_vec(),
            failure_status: Some(status),
            ..Default::default()
        }
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<QueryParams> {
        self.calls
            .borrow()
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, params)| params.clone())
            .collect()
    }

    fn record<T>(&self, endpoint: &'static str, params: &QueryParams, response: T) -> Result<T, BackendError> {
        self.calls.borrow_mut().push((endpoint, params.clone()));

        if self.failing.contains(&endpoint) {
            let status = self.failure_status.unwrap_or(500);
            let detail = match status {
                404 => "Not Found",
                429 => return Err(BackendError::RateLimited),
                _ => "Internal Server Error",
            };
            return Err(BackendError::Status {
                status,
                detail: detail.to_owned(),
            });
        }

        Ok(response)
    }
}

fn trend_point(date: &str, one_color: u64, multicolor: u64) -> TrendPoint {
    match json!({ "date": date, "1 Color": one_color, "Multicolor": multicolor }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

impl DashboardApi for FakeApi {
    async fn stats_overview(&self, params: &QueryParams) -> Result<StatsOverview, BackendError> {
        let stats = StatsOverview {
            total_jobs: 12,
            total_impressions: 4800,
            ..Default::default()
        };
        self.record("stats/overview", params, stats)
    }

    async fn clicks_trend(&self, params: &QueryParams) -> Result<Vec<TrendPoint>, BackendError> {
        let trend = vec![trend_point("2025-06-14", 100, 20), trend_point("2025-06-15", 50, 0)];
        self.record("clicks/trend", params, trend)
    }

    async fn clicks_report(&self, params: &QueryParams) -> Result<ClicksReport, BackendError> {
        let report = ClicksReport {
            total_impressions: 170,
            data_source: Some("jobs".to_owned()),
            ..Default::default()
        };
        self.record("clicks/report", params, report)
    }

    async fn clicks_yoy(&self, params: &QueryParams) -> Result<Value, BackendError> {
        self.record("clicks/yoy", params, json!({ "current": 170, "previous": 120 }))
    }

    async fn clicks_yoy_trend(&self, params: &QueryParams) -> Result<Value, BackendError> {
        self.record("clicks/yoy/trend", params, json!([]))
    }

    async fn clicks_export(&self, params: &QueryParams) -> Result<ClicksExport, BackendError> {
        let export = ClicksExport::parse("date,impressions\n2025-06-15,170\n".to_owned())?;
        self.record("clicks/export", params, export)
    }

    async fn jobs(&self, params: &QueryParams) -> Result<JobList, BackendError> {
        let jobs = JobList {
            jobs: vec![],
            total: 60,
            page: params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1),
            limit: 25,
            pages: 3,
        };
        self.record("jobs", params, jobs)
    }

    async fn availability(&self, params: &QueryParams) -> Result<Value, BackendError> {
        self.record("analysis/availability", params, json!({ "availability": 98.5 }))
    }

    async fn refresh_data(&self, params: &QueryParams) -> Result<RefreshOutcome, BackendError> {
        let outcome = RefreshOutcome {
            total_synced: 4,
            ..Default::default()
        };
        self.record("data/refresh", params, outcome)
    }

    async fn devices(&self) -> Result<Vec<Device>, BackendError> {
        let devices = self.devices.borrow().clone();
        self.record("settings/devices", &QueryParams::new(), devices)
    }

    async fn device_status(&self, _device_id: &str) -> Result<Value, BackendError> {
        self.record("devices/status", &QueryParams::new(), json!({ "state": "PRINTING" }))
    }

    async fn sync_status(&self) -> Result<SyncStatus, BackendError> {
        self.record("sync/status", &QueryParams::new(), SyncStatus::default())
    }

    async fn start_sync(&self) -> Result<Value, BackendError> {
        self.record("sync/start", &QueryParams::new(), json!({ "status": "started" }))
    }

    async fn stop_sync(&self) -> Result<Value, BackendError> {
        self.record("sync/stop", &QueryParams::new(), json!({ "status": "stopped" }))
    }

    async fn sync_jobs(&self, params: &QueryParams) -> Result<JobSyncOutcome, BackendError> {
        self.record("jobs/sync", params, JobSyncOutcome { jobs_synced: 3 })
    }

    async fn import_log(&self, params: &QueryParams) -> Result<LogPage, BackendError> {
        let logs = LogPage {
            logs: vec![json!({ "file_name": "jobs.json", "imported": 120 })],
        };
        self.record("import/log", params, logs)
    }

    async fn sync_log(&self, params: &QueryParams) -> Result<LogPage, BackendError> {
        self.record("sync/log", params, LogPage::default())
    }

    async fn add_device(&self, device: &NewDevice) -> Result<Value, BackendError> {
        let mut params = QueryParams::new();
        params.push("device_id", &device.device_id);
        let response = self.record("settings/devices/add", &params, json!({ "status": "ok" }))?;

        self.devices.borrow_mut().push(Device {
            id: Some(device.device_id.clone()),
            name: Some(device.name.clone()),
            model: Some(device.model.clone()),
        });
        Ok(response)
    }

    async fn remove_device(&self, device_id: &str) -> Result<Value, BackendError> {
        let mut params = QueryParams::new();
        params.push("device_id", device_id);
        let response = self.record("settings/devices/remove", &params, json!({ "status": "ok" }))?;

        self.devices
            .borrow_mut()
            .retain(|device| device.id.as_deref() != Some(device_id));
        Ok(response)
    }
}
