// Device attribute endpoints

use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::{Device, DeviceUpdate};

impl DashboardClient {
    /// `GET /devices/{serial}`
    pub async fn get_device(&self, serial: &str) -> Result<Device, Error> {
        self.get(&["devices", serial]).await
    }

    /// `PUT /devices/{serial}`
    pub async fn update_device(&self, serial: &str, update: &DeviceUpdate) -> Result<Device, Error> {
        debug!(serial, ?update, "updating device");
        self.put(&["devices", serial], update).await
    }
}
