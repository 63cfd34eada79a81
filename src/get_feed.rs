use crate::{Error, GtfsRealtime, Headers};
use bytes::Bytes;
use std::fmt;
use std::path::Path;
use tokio::io::AsyncWrite;
use tracing::instrument;

/// One of the two GTFS-realtime feed files.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Feed {
    /// Trip updates (`gtfsrealtime`).
    TripUpdates,
    /// Vehicle positions (`gtfsposition`).
    Positions,
}

impl Feed {
    pub fn endpoint(self) -> &'static str {
        match self {
            Feed::TripUpdates => "gtfsrealtime",
            Feed::Positions => "gtfsposition",
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

impl GtfsRealtime {
    /// Headers of a feed file, without keeping its body.
    #[instrument(skip(self))]
    pub async fn headers(&self, feed: Feed) -> Result<Headers, Error> {
        self.gateway.get_headers(&[feed.endpoint()]).await
    }

    /// Streams a feed file into `sink`, returning the number of bytes written.
    #[instrument(skip(self, sink))]
    pub async fn download<W>(&self, feed: Feed, sink: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.gateway.download(&[feed.endpoint()], &[], sink).await
    }

    /// Saves a feed file to a new file at `path`. Nothing is created if the
    /// request fails.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn download_to_path(&self, feed: Feed, path: impl AsRef<Path>) -> Result<u64, Error> {
        self.gateway
            .download_to_path(&[feed.endpoint()], &[], path.as_ref())
            .await
    }

    /// The protobuf-encoded feed, undecoded.
    #[instrument(skip(self))]
    pub async fn bytes(&self, feed: Feed) -> Result<Bytes, Error> {
        self.gateway.get_bytes(&[feed.endpoint()], &[]).await
    }

    pub async fn headers_realtime(&self) -> Result<Headers, Error> {
        self.headers(Feed::TripUpdates).await
    }

    pub async fn headers_position(&self) -> Result<Headers, Error> {
        self.headers(Feed::Positions).await
    }

    pub async fn download_realtime<W>(&self, sink: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.download(Feed::TripUpdates, sink).await
    }

    pub async fn download_position<W>(&self, sink: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.download(Feed::Positions, sink).await
    }

    pub async fn download_realtime_to_path(&self, path: impl AsRef<Path>) -> Result<u64, Error> {
        self.download_to_path(Feed::TripUpdates, path).await
    }

    pub async fn download_position_to_path(&self, path: impl AsRef<Path>) -> Result<u64, Error> {
        self.download_to_path(Feed::Positions, path).await
    }

    pub async fn realtime_bytes(&self) -> Result<Bytes, Error> {
        self.bytes(Feed::TripUpdates).await
    }

    pub async fn position_bytes(&self) -> Result<Bytes, Error> {
        self.bytes(Feed::Positions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(Feed::TripUpdates.endpoint(), "gtfsrealtime");
        assert_eq!(Feed::Positions.to_string(), "gtfsposition");
    }
}
