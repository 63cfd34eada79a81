use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable [`Config::from_env`] reads the API key from.
pub const API_KEY_ENV: &str = "TRANSLINK_API_KEY";

pub const RTTI_BASE_URL: &str = "https://api.translink.ca/rttiapi/v1/";
pub const RTDS_BASE_URL: &str = "https://rtdsapi.translink.ca/rtdsapi/v1/";
pub const GTFS_REALTIME_BASE_URL: &str = "https://gtfs.translink.ca/";

/// Settings shared by the three API clients.
#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    /// TransLink API key, sent as the `apikey` query parameter.
    pub api_key: String,

    #[serde(default = "default_rtti_base_url")]
    pub rtti_base_url: String,

    #[serde(default = "default_rtds_base_url")]
    pub rtds_base_url: String,

    #[serde(default = "default_gtfs_realtime_base_url")]
    pub gtfs_realtime_base_url: String,

    /// Whole-request timeout, handed to the HTTP client.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Prepended to this library's own `User-Agent`.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("rtti_base_url", &self.rtti_base_url)
            .field("rtds_base_url", &self.rtds_base_url)
            .field("gtfs_realtime_base_url", &self.gtfs_realtime_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_rtti_base_url() -> String {
    RTTI_BASE_URL.to_string()
}

fn default_rtds_base_url() -> String {
    RTDS_BASE_URL.to_string()
}

fn default_gtfs_realtime_base_url() -> String {
    GTFS_REALTIME_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            rtti_base_url: default_rtti_base_url(),
            rtds_base_url: default_rtds_base_url(),
            gtfs_realtime_base_url: default_gtfs_realtime_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }

    /// Reads the API key from `TRANSLINK_API_KEY`.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(Config::new(key)),
            _ => Err(Error::Config(format!(
                "{} environment variable must be set",
                API_KEY_ENV
            ))),
        }
    }

    pub fn with_rtti_base_url(mut self, url: impl Into<String>) -> Self {
        self.rtti_base_url = url.into();
        self
    }

    pub fn with_rtds_base_url(mut self, url: impl Into<String>) -> Self {
        self.rtds_base_url = url.into();
        self
    }

    pub fn with_gtfs_realtime_base_url(mut self, url: impl Into<String>) -> Self {
        self.gtfs_realtime_base_url = url.into();
        self
    }

    /// Points all three clients at one server (for testing).
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.with_rtti_base_url(url.clone())
            .with_rtds_base_url(url.clone())
            .with_gtfs_realtime_base_url(url)
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.api_key.is_empty() {
            return Err(Error::Config("api_key must not be empty".to_string()));
        }

        for (name, url) in [
            ("rtti_base_url", &self.rtti_base_url),
            ("rtds_base_url", &self.rtds_base_url),
            ("gtfs_realtime_base_url", &self.gtfs_realtime_base_url),
        ] {
            if url.is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }

        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
