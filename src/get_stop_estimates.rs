use crate::{Error, Rtti, StopEstimate};
use tracing::instrument;

impl Rtti {
    /// Next bus estimates for a stop, grouped by route and direction.
    /// Falls back to scheduled times where no estimate is available.
    ///
    /// `count` defaults to 6 upstream and `timeframe` (minutes) to 120.
    #[instrument(skip(self))]
    pub async fn stop_estimates(
        &self,
        stop_no: &str,
        count: Option<u32>,
        timeframe: Option<u32>,
        route_no: Option<&str>,
    ) -> Result<Vec<StopEstimate>, Error> {
        //https://api.translink.ca/rttiapi/v1/stops/60980/estimates?count=3&timeframe=120

        let params = [
            ("count", count.map(|c| c.to_string())),
            ("timeframe", timeframe.map(|t| t.to_string())),
            ("routeNo", route_no.map(str::to_string)),
        ];
        self.gateway.get_json(&["stops", stop_no, "estimates"], &params).await
    }
}
