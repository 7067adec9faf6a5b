// ── Access point operations ──

use tracing::debug;

use crate::dashboard::Dashboard;
use crate::error::CoreError;
use crate::progress::{Progress, RmaEvent};

/// Wireless-specific steps of a replacement from `source` to `target`.
pub struct AccessPointOps<'a, D> {
    dashboard: &'a D,
    progress: &'a dyn Progress,
    source: &'a str,
    target: &'a str,
}

impl<'a, D: Dashboard> AccessPointOps<'a, D> {
    pub fn new(dashboard: &'a D, progress: &'a dyn Progress, source: &'a str, target: &'a str) -> Self {
        Self {
            dashboard,
            progress,
            source,
            target,
        }
    }

    /// Give the target the same RF profile as the source.
    ///
    /// `rf_override`, when set, wins over the source's assignment and the
    /// source's radio settings are not read. Returns the profile applied,
    /// or `None` when there was nothing to apply.
    pub async fn copy_rf_profile(
        &self,
        rf_override: Option<&str>,
    ) -> Result<Option<String>, CoreError> {
        let rf_profile_id = match rf_override {
            Some(id) => Some(id.to_owned()),
            None => {
                let settings = self.dashboard.get_radio_settings(self.source).await?;
                debug!(rf_profile_id = ?settings.rf_profile_id, "source radio settings read");
                settings.rf_profile_id.filter(|id| !id.is_empty())
            }
        };

        let Some(rf_profile_id) = rf_profile_id else {
            self.progress.report(RmaEvent::RfProfileSkipped {
                source: self.source.to_owned(),
            });
            return Ok(None);
        };

        self.dashboard
            .update_radio_settings(self.target, &rf_profile_id)
            .await?;
        self.progress.report(RmaEvent::RfProfileCopied {
            target: self.target.to_owned(),
            rf_profile_id: rf_profile_id.clone(),
        });
        Ok(Some(rf_profile_id))
    }
}
