use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::{ALL_DEVICES_ID, ALL_DEVICES_LABEL};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsOverview {
    pub total_jobs: u64,
    pub total_impressions: u64,
    pub total_sheets: u64,
    pub success_rate: f64,
    pub printed_jobs: u64,
    pub aborted_jobs: u64,
}

/// One bucket of the click trend: a `date` plus one counter per click category.
pub type TrendPoint = serde_json::Map<String, Value>;

const IMPRESSION_CATEGORIES: [&str; 4] = ["1 Color", "2 Colors", "EPM", "Multicolor"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyImpressions {
    pub date: String,
    pub impressions: f64,
}

impl DailyImpressions {
    /// Collapses the per-category counters of a trend bucket into total impressions.
    pub fn from_trend(point: &TrendPoint) -> Self {
        let date = point.get("date").and_then(Value::as_str).unwrap_or_default().to_owned();
        let impressions = IMPRESSION_CATEGORIES
            .iter()
            .filter_map(|category| point.get(*category).and_then(Value::as_f64))
            .sum();

        Self { date, impressions }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClicksReport {
    pub total_impressions: u64,
    pub one_color: u64,
    pub two_colors: u64,
    pub epm: u64,
    pub multicolor: u64,
    pub categories: Vec<Value>,
    pub data_source: Option<String>,
}

impl ClicksReport {
    pub fn data_source_label(&self) -> &'static str {
        match self.data_source.as_deref() {
            Some("jobs") => "HP Jobs API",
            Some("archive") => "Langzeit-Archiv",
            _ => "HP PrintVolume API",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobList {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default = "first_page")]
    pub pages: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub marker: Option<Value>,
    pub press_id: Option<String>,
    pub job_name: Option<String>,
    pub status: Option<String>,
    pub total_impressions: Option<u64>,
    pub click_category: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshOutcome {
    pub total_synced: u64,
    pub results: Vec<RefreshResult>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshResult {
    pub device_id: Option<String>,
    pub status: Option<String>,
}

impl RefreshOutcome {
    pub fn summary(&self) -> String {
        if self.total_synced > 0 {
            return format!("{} neue Jobs von der API geladen", self.total_synced);
        }

        if self.results.iter().any(|r| r.status.as_deref() == Some("synced")) {
            return "API abgefragt, keine neuen Jobs gefunden".to_owned();
        }

        self.message
            .clone()
            .unwrap_or_else(|| "Keine neuen Daten verfügbar".to_owned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncStatus {
    pub running: bool,
    pub recent_logs: Vec<SyncLogEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncLogEntry {
    pub timestamp: Option<String>,
    pub device_name: Option<String>,
    pub jobs_synced: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSyncOutcome {
    pub jobs_synced: u64,
}

impl JobSyncOutcome {
    pub fn summary(&self) -> String {
        format!("{} Jobs synchronisiert", self.jobs_synced)
    }
}

/// Latest entries of the import or sync history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogPage {
    pub logs: Vec<Value>,
}

/// Press registration as sent to the settings endpoint. All fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDevice {
    pub device_id: String,
    pub name: String,
    pub model: String,
}

impl NewDevice {
    pub fn new(device_id: impl Into<String>, name: impl Into<String>, model: impl Into<String>) -> anyhow::Result<Self> {
        let device = Self {
            device_id: device_id.into(),
            name: name.into(),
            model: model.into(),
        };

        if device.device_id.is_empty() || device.name.is_empty() || device.model.is_empty() {
            anyhow::bail!("Bitte alle Gerätefelder ausfüllen");
        }

        Ok(device)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
}

/// The device endpoint has answered in several shapes over time.
#[derive(Deserialize)]
#[serde(untagged)]
enum DevicesResponse {
    List(Vec<Device>),
    DeviceList { device_list: Vec<Device> },
    Devices { devices: Vec<Device> },
    DeviceMap { devices: BTreeMap<String, Device> },
}

pub fn parse_devices(value: Value) -> Vec<Device> {
    match serde_json::from_value::<DevicesResponse>(value) {
        Ok(DevicesResponse::List(devices))
        | Ok(DevicesResponse::DeviceList { device_list: devices })
        | Ok(DevicesResponse::Devices { devices }) => devices,
        Ok(DevicesResponse::DeviceMap { devices }) => devices.into_values().collect(),
        Err(e) => {
            tracing::warn!("Unrecognized device list response: {}", e);
            vec![]
        }
    }
}

/// Display names by device id, including the "all devices" entry.
pub fn device_names(devices: &[Device]) -> HashMap<String, String> {
    let mut names = HashMap::from([(ALL_DEVICES_ID.to_owned(), ALL_DEVICES_LABEL.to_owned())]);

    for device in devices {
        if let Some(id) = device.id.as_ref().filter(|id| !id.is_empty()) {
            names.insert(id.clone(), device.name.clone().unwrap_or_else(|| id.clone()));
        }
    }

    names
}
