use crate::{Error, Param, RoadwayTypes, Rtds};
use std::path::Path;
use tokio::io::AsyncWrite;
use tracing::instrument;

fn tile_params(x: u32, y: u32, z: u32, types: Option<RoadwayTypes>) -> [Param; 4] {
    [
        ("x", Some(x.to_string())),
        ("y", Some(y.to_string())),
        ("z", Some(z.to_string())),
        ("types", types.map(|t| t.to_string())),
    ]
}

impl Rtds {
    /// Streams the PNG map tile at `x`/`y`/`z` into `sink`, returning the
    /// number of bytes written.
    ///
    /// `types` selects which roadways are drawn; all of them when `None`.
    #[instrument(skip(self, sink))]
    pub async fn tile<W>(
        &self,
        sink: &mut W,
        x: u32,
        y: u32,
        z: u32,
        types: Option<RoadwayTypes>,
    ) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.gateway
            .download(&["Tile"], &tile_params(x, y, z, types), sink)
            .await
    }

    /// Saves the map tile to a new file at `path`. Nothing is created if the
    /// request fails.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn tile_to_path(
        &self,
        path: impl AsRef<Path>,
        x: u32,
        y: u32,
        z: u32,
        types: Option<RoadwayTypes>,
    ) -> Result<u64, Error> {
        self.gateway
            .download_to_path(&["Tile"], &tile_params(x, y, z, types), path.as_ref())
            .await
    }
}
