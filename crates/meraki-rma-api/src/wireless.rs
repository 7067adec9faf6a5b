// Wireless radio endpoints

use serde_json::json;
use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::RadioSettings;

impl DashboardClient {
    /// `GET /devices/{serial}/wireless/radio/settings`
    pub async fn get_radio_settings(&self, serial: &str) -> Result<RadioSettings, Error> {
        self.get(&["devices", serial, "wireless", "radio", "settings"])
            .await
    }

    /// Assign an RF profile to an access point.
    ///
    /// `PUT /devices/{serial}/wireless/radio/settings`
    pub async fn update_radio_settings(
        &self,
        serial: &str,
        rf_profile_id: &str,
    ) -> Result<RadioSettings, Error> {
        debug!(serial, rf_profile_id, "updating radio settings");
        self.put(
            &["devices", serial, "wireless", "radio", "settings"],
            &json!({ "rfProfileId": rf_profile_id }),
        )
        .await
    }
}
