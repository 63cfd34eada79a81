use crate::{Bus, Error, Rtti};
use tracing::instrument;

impl Rtti {
    /// Looks up a bus currently in service by its vehicle number.
    ///
    /// RTTI rejects five-digit vehicle numbers here even though
    /// [`Rtti::buses`] reports them.
    #[instrument(skip(self))]
    pub async fn bus(&self, vehicle_no: &str) -> Result<Bus, Error> {
        self.gateway.get_json(&["buses", vehicle_no], &[]).await
    }

    /// All buses in service, optionally only those serving a stop or route.
    #[instrument(skip(self))]
    pub async fn buses(
        &self,
        stop_no: Option<&str>,
        route_no: Option<&str>,
    ) -> Result<Vec<Bus>, Error> {
        let params = [
            ("stopNo", stop_no.map(str::to_string)),
            ("routeNo", route_no.map(str::to_string)),
        ];
        self.gateway.get_json(&["buses"], &params).await
    }
}
