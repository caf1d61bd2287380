use crate::adapter::backend::{BackendError, Device, NewDevice};
use crate::port::DashboardApi;

/// Registers a press and returns the updated device list.
pub async fn add_device<A: DashboardApi>(api: &A, device: &NewDevice) -> Result<Vec<Device>, BackendError> {
    api.add_device(device).await?;
    api.devices().await
}

/// Removes a press and returns the updated device list.
pub async fn remove_device<A: DashboardApi>(api: &A, device_id: &str) -> Result<Vec<Device>, BackendError> {
    api.remove_device(device_id).await?;
    api.devices().await
}
