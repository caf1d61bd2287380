use infrastructure::HttpClientConfig;
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::port::DashboardApi;
use crate::query::QueryParams;

use super::{
    BackendError, ClicksExport, ClicksReport, Device, JobList, JobSyncOutcome, LogPage, NewDevice, RefreshOutcome,
    StatsOverview, SyncStatus, TrendPoint, parse_devices,
};

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl BackendConfig {
    pub fn new_client(&self) -> anyhow::Result<BackendClient> {
        let mut http_config = HttpClientConfig::new(self.token.clone());
        if let Some(timeout_secs) = self.timeout_secs {
            http_config = http_config.with_timeout_secs(timeout_secs);
        }

        Ok(BackendClient {
            client: http_config.new_tracing_client()?,
            base_url: self.url.trim_end_matches('/').to_owned(),
        })
    }
}

/// HTTP client for the dashboard backend. Every call is an independent request, nothing
/// is cached or cancelled.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl BackendClient {
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn request(&self, method: Method, path: &str, params: &QueryParams) -> RequestBuilder {
        self.client.request(method, self.url(path)).query(params)
    }

    async fn send(&self, method: Method, path: &str, params: &QueryParams) -> Result<reqwest::Response, BackendError> {
        tracing::debug!("{} {} {:?}", method, path, params);
        self.execute(self.request(method, path, params), path).await
    }

    async fn execute(&self, request: RequestBuilder, path: &str) -> Result<reqwest::Response, BackendError> {
        let response = request.send().await.map_err(|source| BackendError::Transport {
            url: self.url(path),
            source,
        })?;

        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> Result<T, BackendError> {
        decode_json(self.send(Method::GET, path, params).await?).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> Result<T, BackendError> {
        decode_json(self.send(Method::POST, path, params).await?).await
    }

    async fn post_body<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, BackendError> {
        tracing::debug!("POST {} with body", path);
        let request = self.request(Method::POST, path, &QueryParams::new()).json(body);
        decode_json(self.execute(request, path).await?).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        decode_json(self.send(Method::DELETE, path, &QueryParams::new()).await?).await
    }

    async fn get_text(&self, path: &str, params: &QueryParams) -> Result<String, BackendError> {
        let response = self.send(Method::GET, path, params).await?;
        let url = response.url().to_string();

        response
            .text()
            .await
            .map_err(|source| BackendError::Decode { url, source })
    }
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let url = response.url().to_string();

    response
        .json::<T>()
        .await
        .map_err(|source| BackendError::Decode { url, source })
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!("Backend rate limit reached for {}", response.url());
        return Err(BackendError::RateLimited);
    }

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        detail: error_detail(&body).unwrap_or_else(|| status.to_string()),
    })
}

/// Error text from a `{"detail": ...}` or `{"message": ...}` body.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    ["detail", "message"]
        .iter()
        .find_map(|key| value.get(*key))
        .map(|detail| match detail {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

impl DashboardApi for BackendClient {
    async fn stats_overview(&self, params: &QueryParams) -> Result<StatsOverview, BackendError> {
        self.get_json("stats/overview", params).await
    }

    async fn clicks_trend(&self, params: &QueryParams) -> Result<Vec<TrendPoint>, BackendError> {
        self.get_json("clicks/trend", params).await
    }

    async fn clicks_report(&self, params: &QueryParams) -> Result<ClicksReport, BackendError> {
        self.get_json("clicks/report", params).await
    }

    async fn clicks_yoy(&self, params: &QueryParams) -> Result<Value, BackendError> {
        self.get_json("clicks/yoy", params).await
    }

    async fn clicks_yoy_trend(&self, params: &QueryParams) -> Result<Value, BackendError> {
        self.get_json("clicks/yoy/trend", params).await
    }

    async fn clicks_export(&self, params: &QueryParams) -> Result<ClicksExport, BackendError> {
        let raw = self.get_text("clicks/export", params).await?;
        ClicksExport::parse(raw)
    }

    async fn jobs(&self, params: &QueryParams) -> Result<JobList, BackendError> {
        self.get_json("jobs", params).await
    }

    async fn availability(&self, params: &QueryParams) -> Result<Value, BackendError> {
        self.get_json("analysis/availability", params).await
    }

    async fn refresh_data(&self, params: &QueryParams) -> Result<RefreshOutcome, BackendError> {
        self.post_json("data/refresh", params).await
    }

    async fn devices(&self) -> Result<Vec<Device>, BackendError> {
        let value: Value = self.get_json("settings/devices", &QueryParams::new()).await?;
        Ok(parse_devices(value))
    }

    async fn device_status(&self, device_id: &str) -> Result<Value, BackendError> {
        self.get_json(&format!("devices/{}/status", device_id), &QueryParams::new())
            .await
    }

    async fn sync_status(&self) -> Result<SyncStatus, BackendError> {
        self.get_json("sync/status", &QueryParams::new()).await
    }

    async fn start_sync(&self) -> Result<Value, BackendError> {
        self.post_json("sync/start", &QueryParams::new()).await
    }

    async fn stop_sync(&self) -> Result<Value, BackendError> {
        self.post_json("sync/stop", &QueryParams::new()).await
    }

    async fn sync_jobs(&self, params: &QueryParams) -> Result<JobSyncOutcome, BackendError> {
        self.post_json("jobs/sync", params).await
    }

    async fn import_log(&self, params: &QueryParams) -> Result<LogPage, BackendError> {
        self.get_json("import/log", params).await
    }

    async fn sync_log(&self, params: &QueryParams) -> Result<LogPage, BackendError> {
        self.get_json("sync/log", params).await
    }

    async fn add_device(&self, device: &NewDevice) -> Result<Value, BackendError> {
        self.post_body("settings/devices/add", device).await
    }

    async fn remove_device(&self, device_id: &str) -> Result<Value, BackendError> {
        self.delete_json(&format!("settings/devices/{}", device_id)).await
    }
}
