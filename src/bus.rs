use crate::decode::Decode;
use crate::time::parse_last_update;
use crate::{coerce, DecodeError, RouteMap};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Last reported position and trip of an in-service bus.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Bus {
    /// Up to 5 digits. Note that [`Rtti::bus`](crate::Rtti::bus) is rejected
    /// upstream for 5-digit numbers even though such buses are listed.
    pub vehicle_no: String,

    pub trip_id: i64,

    pub route_no: String,

    pub direction: String,

    /// Destination headsign of the trip.
    pub destination: String,

    pub pattern: String,

    pub latitude: f64,

    pub longitude: f64,

    /// When the position was recorded. RTTI sends e.g. `"10:07:57 pm"`.
    pub recorded_time: DateTime<Tz>,

    pub route_map: RouteMap,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct BusRecord {
    vehicle_no: String,
    #[serde(deserialize_with = "coerce::integer")]
    trip_id: i64,
    route_no: String,
    direction: String,
    destination: String,
    pattern: String,
    #[serde(deserialize_with = "coerce::float")]
    latitude: f64,
    #[serde(deserialize_with = "coerce::float")]
    longitude: f64,
    recorded_time: String,
    route_map: RouteMap,
}

impl Decode for Bus {
    type Wire = BusRecord;

    fn resolve(wire: BusRecord, reference: &DateTime<Tz>) -> Result<Bus, DecodeError> {
        let recorded_time = parse_last_update(&wire.recorded_time, reference)
            .map_err(DecodeError::time("RecordedTime"))?;

        Ok(Bus {
            vehicle_no: wire.vehicle_no,
            trip_id: wire.trip_id,
            route_no: wire.route_no,
            direction: wire.direction,
            destination: wire.destination,
            pattern: wire.pattern,
            latitude: wire.latitude,
            longitude: wire.longitude,
            recorded_time,
            route_map: wire.route_map,
        })
    }
}
