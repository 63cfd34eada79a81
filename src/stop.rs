use crate::coerce;
use crate::decode::Decode;
use crate::DecodeError;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A location where buses provide scheduled service.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Stop {
    /// The 5-digit stop number.
    pub stop_no: u32,

    pub name: String,

    /// Bay number, if applicable.
    pub bay_no: String,

    pub city: String,

    /// The street the stop is located on.
    pub on_street: String,

    /// The intersecting street of the stop.
    pub at_street: String,

    pub latitude: f64,

    pub longitude: f64,

    pub wheelchair_access: bool,

    /// Distance from the searched location. RTTI reports -1 outside a search.
    pub distance: i32,

    /// Routes serving the stop, as RTTI sends them (comma separated).
    pub routes: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct StopRecord {
    #[serde(deserialize_with = "coerce::integer")]
    stop_no: u32,
    name: String,
    bay_no: String,
    city: String,
    on_street: String,
    at_street: String,
    #[serde(deserialize_with = "coerce::float")]
    latitude: f64,
    #[serde(deserialize_with = "coerce::float")]
    longitude: f64,
    #[serde(deserialize_with = "coerce::boolean")]
    wheelchair_access: bool,
    #[serde(deserialize_with = "coerce::integer")]
    distance: i32,
    routes: String,
}

impl Decode for Stop {
    type Wire = StopRecord;

    fn resolve(wire: StopRecord, _reference: &DateTime<Tz>) -> Result<Stop, DecodeError> {
        if wire.stop_no == 0 {
            return Err(DecodeError::invalid("StopNo", "must be positive"));
        }
        if !(-90.0..=90.0).contains(&wire.latitude) {
            return Err(DecodeError::invalid(
                "Latitude",
                format!("{} is out of range", wire.latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&wire.longitude) {
            return Err(DecodeError::invalid(
                "Longitude",
                format!("{} is out of range", wire.longitude),
            ));
        }

        Ok(Stop {
            stop_no: wire.stop_no,
            name: wire.name,
            bay_no: wire.bay_no,
            city: wire.city,
            on_street: wire.on_street,
            at_street: wire.at_street,
            latitude: wire.latitude,
            longitude: wire.longitude,
            wheelchair_access: wire.wheelchair_access,
            distance: wire.distance,
            routes: wire.routes,
        })
    }
}
