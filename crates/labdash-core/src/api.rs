// ── Commander API seam ──
//
// The widgets only need two reads. `labdash_api::Client` implements them
// over HTTP; tests script them.

use crate::error::CoreError;
use crate::model::{AlertFeed, AlertSource, ContainerStatus};

/// Read access to the commander endpoints.
#[allow(async_fn_in_trait)]
pub trait LabApi {
    /// Fetch the status collection from `endpoint`.
    async fn container_status(&self, endpoint: &str) -> Result<Vec<ContainerStatus>, CoreError>;

    /// Fetch the alert feed of one source.
    async fn alerts(&self, source: AlertSource) -> Result<AlertFeed, CoreError>;
}

impl LabApi for labdash_api::Client {
    async fn container_status(&self, endpoint: &str) -> Result<Vec<ContainerStatus>, CoreError> {
        let records = self.container_status_at(endpoint).await?;
        Ok(records.into_iter().map(ContainerStatus::from).collect())
    }

    async fn alerts(&self, source: AlertSource) -> Result<AlertFeed, CoreError> {
        Ok(labdash_api::Client::alerts(self, source.id()).await?)
    }
}
