use crate::coerce;
use crate::decode::decode_as_is;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current information about one direction of travel along a link.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkInfo {
    #[serde(deserialize_with = "coerce::integer")]
    pub link_id: i64,

    /// Forward (as opposed to reverse) direction of the link.
    #[serde(deserialize_with = "coerce::boolean")]
    pub is_fwd: bool,

    /// Degrees clockwise from north, 0 to 360.
    #[serde(deserialize_with = "coerce::float")]
    pub angle: f64,

    #[serde(deserialize_with = "coerce::float")]
    pub length_metres: f64,

    /// `None` if there is no current data for the link.
    #[serde(deserialize_with = "coerce::nullable_float")]
    pub speed_kmph: Option<f64>,

    /// `None` if there is no current data for the link.
    #[serde(deserialize_with = "coerce::nullable_float")]
    pub travel_time_minutes: Option<f64>,

    /// 0 to 100; `None` if there is no current data for the link.
    #[serde(deserialize_with = "coerce::nullable_integer")]
    pub quality: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveDataTimestampResult {
    /// When live data was last updated; `None` if there is no current data.
    #[serde(deserialize_with = "coerce::nullable_utc_timestamp")]
    pub timestamp_utc: Option<DateTime<Utc>>,
}

/// All live data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveDataResult {
    #[serde(deserialize_with = "coerce::nullable_utc_timestamp")]
    pub timestamp_utc: Option<DateTime<Utc>>,

    /// Every drivable direction on every link.
    pub data: Vec<LinkInfo>,
}

/// Live data for the links around a point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveDataAtPointResult {
    #[serde(deserialize_with = "coerce::float")]
    pub x: f64,

    #[serde(deserialize_with = "coerce::float")]
    pub y: f64,

    #[serde(deserialize_with = "coerce::nullable_utc_timestamp")]
    pub timestamp_utc: Option<DateTime<Utc>>,

    pub data: Vec<LinkInfo>,
}

decode_as_is!(LinkInfo, LiveDataTimestampResult, LiveDataResult, LiveDataAtPointResult);
