use crate::{
    ColourLegendItem, Error, LiveDataAtPointResult, LiveDataResult, LiveDataTimestampResult,
    RoadwayTypes, Rtds,
};
use tracing::instrument;

impl Rtds {
    /// When live data was last updated.
    #[instrument(skip(self))]
    pub async fn live_data_timestamp(&self) -> Result<LiveDataTimestampResult, Error> {
        self.gateway.get_json(&["LiveDataTimestampUtc"], &[]).await
    }

    /// Live data for every link.
    #[instrument(skip(self))]
    pub async fn all_live_data(&self) -> Result<LiveDataResult, Error> {
        self.gateway.get_json(&["AllLiveData"], &[]).await
    }

    /// Live data for the links near a point.
    ///
    /// `x` is the longitude and `y` the latitude. `z` is the zoom level of the
    /// map the point was picked on, which sets how far away a link may be and
    /// still match. `types` should match the types shown on that map's tiles.
    #[instrument(skip(self))]
    pub async fn live_data_at_point(
        &self,
        x: f64,
        y: f64,
        z: Option<u32>,
        types: Option<RoadwayTypes>,
    ) -> Result<LiveDataAtPointResult, Error> {
        let params = [
            ("x", Some(x.to_string())),
            ("y", Some(y.to_string())),
            ("z", z.map(|z| z.to_string())),
            ("types", types.map(|t| t.to_string())),
        ];
        self.gateway.get_json(&["LiveDataAtPoint"], &params).await
    }

    #[instrument(skip(self))]
    pub async fn colour_legend(&self) -> Result<Vec<ColourLegendItem>, Error> {
        self.gateway.get_json(&["ColourLegend"], &[]).await
    }
}
