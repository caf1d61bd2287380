use super::{DeviceSelection, QueryParams};

/// Press synced when the dashboard shows all presses. The vendor API syncs one press
/// per request.
pub const DEFAULT_SYNC_DEVICE: &str = "47100122";

pub const HISTORY_LIMIT: u32 = 10;

/// Manual job sync for one press.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSyncQuery {
    pub device: DeviceSelection,
}

impl JobSyncQuery {
    pub fn device_id(&self) -> &str {
        match &self.device {
            DeviceSelection::All => DEFAULT_SYNC_DEVICE,
            DeviceSelection::Device(id) => id,
        }
    }

    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("device_id", self.device_id());
        params
    }
}

/// Import and sync history, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    pub limit: u32,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self { limit: HISTORY_LIMIT }
    }
}

impl HistoryQuery {
    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("limit", self.limit);
        params
    }
}
