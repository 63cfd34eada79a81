use crate::{Error, Rtti, Stop};
use tracing::instrument;

impl Rtti {
    /// Looks up a stop by its five-digit stop number.
    #[instrument(skip(self))]
    pub async fn stop(&self, stop_no: &str) -> Result<Stop, Error> {
        //https://api.translink.ca/rttiapi/v1/stops/60980?apikey=...

        self.gateway.get_json(&["stops", stop_no], &[]).await
    }

    /// Finds stops around a point.
    ///
    /// `radius_m` defaults to 500 upstream and may be at most 2000. `route_no`
    /// keeps only stops served by that route.
    #[instrument(skip(self))]
    pub async fn stops(
        &self,
        lat: f64,
        long: f64,
        radius_m: Option<u32>,
        route_no: Option<&str>,
    ) -> Result<Vec<Stop>, Error> {
        //https://api.translink.ca/rttiapi/v1/stops?lat=49.187706&long=-122.850060&radius=500

        let params = [
            ("lat", Some(format!("{:.6}", lat))),
            ("long", Some(format!("{:.6}", long))),
            ("radius", radius_m.map(|r| r.to_string())),
            ("routeno", route_no.map(str::to_string)),
        ];
        self.gateway.get_json(&["stops"], &params).await
    }
}
