use crate::{Error, Rtti, Status, StatusService};
use tracing::instrument;

impl Rtti {
    /// Update status of the bus location and real-time schedule services.
    #[instrument(skip(self))]
    pub async fn status(&self, service: &StatusService) -> Result<Vec<Status>, Error> {
        self.gateway.get_json(&["status", service.as_str()], &[]).await
    }
}
