use crate::{Error, Route, Rtti};
use tracing::instrument;

impl Rtti {
    #[instrument(skip(self))]
    pub async fn route(&self, route_no: &str) -> Result<Route, Error> {
        self.gateway.get_json(&["routes", route_no], &[]).await
    }

    /// Routes through a stop.
    ///
    /// RTTI in practice requires `stop_no`, and sometimes answers 4014 (no
    /// routes found) for stops that do have routes.
    #[instrument(skip(self))]
    pub async fn routes(&self, stop_no: Option<&str>) -> Result<Vec<Route>, Error> {
        let params = [("stopNo", stop_no.map(str::to_string))];
        self.gateway.get_json(&["routes"], &params).await
    }
}
