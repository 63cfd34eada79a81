//! Client for the TransLink Open API.
//!
//! Three services are covered, each by its own client:
//!
//! * [`Rtti`]: real-time transit information (stops, estimates, buses, routes),
//! * [`Rtds`]: road-speed data and traffic tiles,
//! * [`GtfsRealtime`]: the GTFS-realtime trip update and position feeds.
//!
//! Every call is a single GET. Non-success responses become [`Error::Api`],
//! successful JSON bodies are decoded strictly into the record types below.
mod get_buses;
mod get_feed;
mod get_live_data;
mod get_routes;
mod get_status;
mod get_stop_estimates;
mod get_stops;
mod get_tile;

mod api_error;
pub use api_error::ApiError;
mod bus;
pub use bus::Bus;
mod coerce;
mod colour_legend_item;
pub use colour_legend_item::ColourLegendItem;
mod config;
pub use config::{Config, API_KEY_ENV, GTFS_REALTIME_BASE_URL, RTDS_BASE_URL, RTTI_BASE_URL};
pub mod decode;
pub use decode::{decode_json, Decode};
mod error;
pub use error::{DecodeError, Error};
mod error_code;
pub use error_code::ErrorCode;
mod headers;
pub use headers::Headers;
mod live_data;
pub use live_data::{LinkInfo, LiveDataAtPointResult, LiveDataResult, LiveDataTimestampResult};
mod roadway_types;
pub use roadway_types::RoadwayTypes;
mod route;
pub use route::{Pattern, Route};
mod route_map;
pub use route_map::RouteMap;
mod status;
pub use status::{Status, StatusService};
mod stop;
pub use stop::Stop;
mod stop_estimate;
pub use stop_estimate::{Schedule, ScheduleStatus, StopEstimate};
pub mod time;
pub use time::{parse_last_update, parse_leave_time, TimeParseError, TRANSLINK_TZ};

pub use get_feed::Feed;

use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Response;
use std::fmt;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};
use url::Url;

const AGENT: &str = concat!("translink/", env!("CARGO_PKG_VERSION"));

/// A query parameter; `None` values are left out of the request.
type Param = (&'static str, Option<String>);

/// Request plumbing shared by the service clients.
#[derive(Clone)]
struct Gateway {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    user_agent: HeaderValue,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Gateway {
    fn new(base_url: &str, config: &Config) -> Result<Gateway, Error> {
        let client = match reqwest::ClientBuilder::new()
            .timeout(config.timeout())
            .build()
        {
            Ok(r) => r,
            Err(err) => {
                return Err(Error::Config(format!(
                    "could not create reqwest client: {}",
                    err.without_url()
                )))
            }
        };

        Gateway::with_client(client, base_url, config)
    }

    fn with_client(
        client: reqwest::Client,
        base_url: &str,
        config: &Config,
    ) -> Result<Gateway, Error> {
        config.validate()?;

        let base_url = Url::parse(base_url)
            .map_err(|err| Error::Config(format!("invalid base URL {:?}: {}", base_url, err)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "invalid base URL {:?}: cannot hold a path",
                base_url.as_str()
            )));
        }

        let user_agent = match &config.user_agent {
            Some(prefix) => format!("{} {}", prefix, AGENT),
            None => AGENT.to_string(),
        };
        let user_agent = HeaderValue::from_str(&user_agent)
            .map_err(|err| Error::Config(format!("invalid user agent: {}", err)))?;

        Ok(Gateway {
            client,
            base_url,
            api_key: config.api_key.clone(),
            user_agent,
        })
    }

    /// Appends `segments` to the base path, each percent-encoded on its own,
    /// then the set parameters and the API key.
    fn url(&self, segments: &[&str], params: &[Param]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("invalid base URL {:?}", self.base_url.as_str())))?
            .pop_if_empty()
            .extend(segments);

        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                if let Some(value) = value {
                    query.append_pair(name, value);
                }
            }
            query.append_pair("apikey", &self.api_key);
        }

        Ok(url)
    }

    /// Sends a GET and turns any non-success status into an [`ApiError`].
    async fn send(&self, segments: &[&str], params: &[Param], json: bool) -> Result<Response, Error> {
        let url = self.url(segments, params)?;
        debug!(
            path = url.path(),
            params = params.iter().filter(|(_, value)| value.is_some()).count(),
            "Sending request"
        );

        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.clone());
        if json {
            request = request.header(ACCEPT, HeaderValue::from_static("application/json"));
        }

        let res = request.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let url = res.url().clone();
        let headers = res.headers().clone();
        let body = res.bytes().await.unwrap_or_default();
        let err = ApiError::from_response_parts(url, status.as_u16(), headers, body);
        warn!(
            path = err.url.path(),
            status = err.status_code,
            code = %err.code,
            message = %err.message,
            "TransLink API error"
        );

        Err(err.into())
    }

    async fn get_json<T: Decode>(&self, segments: &[&str], params: &[Param]) -> Result<T, Error> {
        let text = self.send(segments, params, true).await?.text().await?;
        let reference = time::now();
        let body: T = decode_json(&text, &reference)?;
        debug!(bytes = text.len(), "Decoded response");
        Ok(body)
    }

    async fn get_bytes(&self, segments: &[&str], params: &[Param]) -> Result<bytes::Bytes, Error> {
        let body = self.send(segments, params, false).await?.bytes().await?;
        debug!(bytes = body.len(), "Fetched raw body");
        Ok(body)
    }

    async fn download<W>(&self, segments: &[&str], params: &[Param], sink: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let res = self.send(segments, params, false).await?;
        write_body(res, sink).await
    }

    /// Like [`Gateway::download`], but the file is only created once the
    /// response has come back successfully.
    async fn download_to_path(
        &self,
        segments: &[&str],
        params: &[Param],
        path: &Path,
    ) -> Result<u64, Error> {
        let res = self.send(segments, params, false).await?;
        let mut file = tokio::fs::File::create(path).await?;
        write_body(res, &mut file).await
    }

    /// GETs the resource for its headers only; the server refuses HEAD.
    async fn get_headers(&self, segments: &[&str]) -> Result<Headers, Error> {
        let res = self.send(segments, &[], false).await?;
        Ok(Headers::from_header_map(res.headers())?)
    }
}

async fn write_body<W>(mut res: Response, sink: &mut W) -> Result<u64, Error>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut size: u64 = 0;
    while let Some(chunk) = res.chunk().await? {
        sink.write_all(&chunk).await?;
        size += chunk.len() as u64;
    }
    sink.flush().await?;

    debug!(bytes = size, "Download complete");
    Ok(size)
}

/// Client for the Real-Time Transit Information API.
#[derive(Debug, Clone)]
pub struct Rtti {
    gateway: Gateway,
}

impl Rtti {
    pub fn new(api_key: impl Into<String>) -> Result<Rtti, Error> {
        Rtti::from_config(&Config::new(api_key))
    }

    pub fn from_config(config: &Config) -> Result<Rtti, Error> {
        Ok(Rtti {
            gateway: Gateway::new(&config.rtti_base_url, config)?,
        })
    }

    /// Uses an existing client, sharing its connection pool. The configured
    /// timeout is ignored in favour of the client's own.
    pub fn with_client(client: reqwest::Client, config: &Config) -> Result<Rtti, Error> {
        Ok(Rtti {
            gateway: Gateway::with_client(client, &config.rtti_base_url, config)?,
        })
    }
}

/// Client for the Regional Traffic Data System API.
#[derive(Debug, Clone)]
pub struct Rtds {
    gateway: Gateway,
}

impl Rtds {
    pub fn new(api_key: impl Into<String>) -> Result<Rtds, Error> {
        Rtds::from_config(&Config::new(api_key))
    }

    pub fn from_config(config: &Config) -> Result<Rtds, Error> {
        Ok(Rtds {
            gateway: Gateway::new(&config.rtds_base_url, config)?,
        })
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Result<Rtds, Error> {
        Ok(Rtds {
            gateway: Gateway::with_client(client, &config.rtds_base_url, config)?,
        })
    }
}

/// Client for the GTFS-realtime feeds.
#[derive(Debug, Clone)]
pub struct GtfsRealtime {
    gateway: Gateway,
}

impl GtfsRealtime {
    pub fn new(api_key: impl Into<String>) -> Result<GtfsRealtime, Error> {
        GtfsRealtime::from_config(&Config::new(api_key))
    }

    pub fn from_config(config: &Config) -> Result<GtfsRealtime, Error> {
        Ok(GtfsRealtime {
            gateway: Gateway::new(&config.gtfs_realtime_base_url, config)?,
        })
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Result<GtfsRealtime, Error> {
        Ok(GtfsRealtime {
            gateway: Gateway::with_client(client, &config.gtfs_realtime_base_url, config)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base_url: &str) -> Gateway {
        Gateway::new(base_url, &Config::new("secret")).unwrap()
    }

    #[test]
    fn unset_params_are_omitted() {
        let gateway = gateway("https://api.translink.ca/rttiapi/v1");
        let url = gateway
            .url(
                &["stops", "60980", "estimates"],
                &[
                    ("count", Some("3".to_string())),
                    ("timeframe", None),
                    ("routeNo", Some("050".to_string())),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.translink.ca/rttiapi/v1/stops/60980/estimates?count=3&routeNo=050&apikey=secret"
        );
    }

    #[test]
    fn api_key_is_always_sent() {
        let gateway = gateway("https://gtfs.translink.ca/");
        let url = gateway.url(&["gtfsrealtime"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://gtfs.translink.ca/gtfsrealtime?apikey=secret");
    }

    #[test]
    fn path_segments_are_escaped() {
        let gateway = gateway("https://api.translink.ca/rttiapi/v1/");
        let url = gateway.url(&["stops", "60980?count=1/x#y"], &[]).unwrap();
        assert_eq!(url.path(), "/rttiapi/v1/stops/60980%3Fcount=1%2Fx%23y");
        assert_eq!(url.query(), Some("apikey=secret"));

        let url = gateway.url(&["status", "../buses"], &[]).unwrap();
        assert_eq!(url.path(), "/rttiapi/v1/status/..%2Fbuses");
    }

    #[test]
    fn debug_hides_api_key() {
        let client = Rtti::new("s3cr3tkey").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("s3cr3tkey"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn user_agent() {
        assert_eq!(gateway("https://gtfs.translink.ca/").user_agent, AGENT);

        let config = Config::new("secret").with_user_agent("my-app/2.0");
        let gateway = Gateway::new(GTFS_REALTIME_BASE_URL, &config).unwrap();
        assert_eq!(
            gateway.user_agent.to_str().unwrap(),
            format!("my-app/2.0 translink/{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn clients_can_be_shared() {
        fn shared<T: Send + Sync + Clone>() {}
        shared::<Rtti>();
        shared::<Rtds>();
        shared::<GtfsRealtime>();
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(Rtti::new(""), Err(Error::Config(_))));
        assert!(matches!(
            Rtds::from_config(&Config::new("key").with_rtds_base_url("not a url")),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Rtds::from_config(&Config::new("key").with_rtds_base_url("mailto:x")),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            GtfsRealtime::from_config(&Config::new("key").with_user_agent("bad\nagent")),
            Err(Error::Config(_))
        ));
    }
}
