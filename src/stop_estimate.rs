use crate::decode::Decode;
use crate::time::{parse_last_update, parse_leave_time};
use crate::{coerce, DecodeError, RouteMap};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bus arrival estimates for one route at a stop.
///
/// RTTI groups estimates by route, destination and direction; that order is kept.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct StopEstimate {
    pub route_no: String,

    pub route_name: String,

    /// Direction of the route at this stop.
    pub direction: String,

    pub route_map: RouteMap,

    /// Never empty in practice: RTTI leaves out a route with nothing scheduled.
    pub schedules: Vec<Schedule>,
}

/// Real-time or scheduled departure information for a single bus.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Schedule {
    pub pattern: String,

    pub destination: String,

    /// Expected departure at the stop. RTTI sends e.g. `"05:20pm 2018-02-18"`
    /// or just `"05:20pm"`; seconds are always zero.
    pub expected_leave_time: DateTime<Tz>,

    /// Minutes until departure.
    pub expected_countdown: i32,

    pub schedule_status: ScheduleStatus,

    pub cancelled_trip: bool,

    pub cancelled_stop: bool,

    pub added_trip: bool,

    pub added_stop: bool,

    /// RTTI sends e.g. `"05:20:30 pm"`.
    pub last_update: DateTime<Tz>,
}

/// Whether a schedule entry runs to plan.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(try_from = "String")]
pub enum ScheduleStatus {
    #[serde(rename = "*")]
    Scheduled,
    #[serde(rename = "-")]
    Delayed,
    #[serde(rename = "+")]
    Ahead,
}

impl ScheduleStatus {
    /// The marker RTTI uses for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "*",
            ScheduleStatus::Delayed => "-",
            ScheduleStatus::Ahead => "+",
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "*" => Ok(ScheduleStatus::Scheduled),
            "-" => Ok(ScheduleStatus::Delayed),
            "+" => Ok(ScheduleStatus::Ahead),
            other => Err(format!("unknown schedule status {other:?}")),
        }
    }
}

impl TryFrom<String> for ScheduleStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct StopEstimateRecord {
    route_no: String,
    route_name: String,
    direction: String,
    route_map: RouteMap,
    schedules: Vec<ScheduleRecord>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleRecord {
    pattern: String,
    destination: String,
    expected_leave_time: String,
    #[serde(deserialize_with = "coerce::integer")]
    expected_countdown: i32,
    schedule_status: ScheduleStatus,
    #[serde(deserialize_with = "coerce::boolean")]
    cancelled_trip: bool,
    #[serde(deserialize_with = "coerce::boolean")]
    cancelled_stop: bool,
    #[serde(deserialize_with = "coerce::boolean")]
    added_trip: bool,
    #[serde(deserialize_with = "coerce::boolean")]
    added_stop: bool,
    last_update: String,
}

impl Decode for Schedule {
    type Wire = ScheduleRecord;

    fn resolve(wire: ScheduleRecord, reference: &DateTime<Tz>) -> Result<Schedule, DecodeError> {
        let expected_leave_time = parse_leave_time(&wire.expected_leave_time, reference)
            .map_err(DecodeError::time("ExpectedLeaveTime"))?;
        let last_update = parse_last_update(&wire.last_update, reference)
            .map_err(DecodeError::time("LastUpdate"))?;

        Ok(Schedule {
            pattern: wire.pattern,
            destination: wire.destination,
            expected_leave_time,
            expected_countdown: wire.expected_countdown,
            schedule_status: wire.schedule_status,
            cancelled_trip: wire.cancelled_trip,
            cancelled_stop: wire.cancelled_stop,
            added_trip: wire.added_trip,
            added_stop: wire.added_stop,
            last_update,
        })
    }
}

impl Decode for StopEstimate {
    type Wire = StopEstimateRecord;

    fn resolve(wire: StopEstimateRecord, reference: &DateTime<Tz>) -> Result<StopEstimate, DecodeError> {
        Ok(StopEstimate {
            route_no: wire.route_no,
            route_name: wire.route_name,
            direction: wire.direction,
            route_map: wire.route_map,
            schedules: Vec::<Schedule>::resolve(wire.schedules, reference)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_json;
    use crate::time::localize;
    use chrono::NaiveDateTime;

    fn local(value: &str) -> DateTime<Tz> {
        localize(NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    const ESTIMATES: &str = r#"[{
        "RouteNo": "502",
        "RouteName": "LANGLEY CTR/SURREY CTRL STN",
        "Direction": "EAST",
        "RouteMap": {"Href": "http://nb.translink.ca/geodata/502.kmz"},
        "Schedules": [
            {
                "Pattern": "E1",
                "Destination": "LANGLEY CTR",
                "ExpectedLeaveTime": "10:30pm 2018-02-19",
                "ExpectedCountdown": 8,
                "ScheduleStatus": "*",
                "CancelledTrip": false,
                "CancelledStop": false,
                "AddedTrip": false,
                "AddedStop": false,
                "LastUpdate": "10:12:43 pm"
            },
            {
                "Pattern": "E1",
                "Destination": "LANGLEY CTR",
                "ExpectedLeaveTime": "12:09am",
                "ExpectedCountdown": "-1",
                "ScheduleStatus": "- ",
                "CancelledTrip": false,
                "CancelledStop": "true",
                "AddedTrip": 0,
                "AddedStop": 1,
                "LastUpdate": "10:20:00 pm"
            }
        ]
    }]"#;

    #[test]
    fn decode_estimates() {
        let reference = local("2018-02-19 22:22:00");
        let estimates: Vec<StopEstimate> = decode_json(ESTIMATES, &reference).unwrap();
        assert_eq!(estimates.len(), 1);

        let est = &estimates[0];
        assert_eq!(est.route_no, "502");
        assert_eq!(est.direction, "EAST");
        assert_eq!(est.route_map.href.as_str(), "http://nb.translink.ca/geodata/502.kmz");
        assert_eq!(est.schedules.len(), 2);

        let first = &est.schedules[0];
        assert_eq!(first.expected_leave_time, local("2018-02-19 22:30:00"));
        assert_eq!(first.expected_leave_time.to_rfc3339(), "2018-02-19T22:30:00-08:00");
        assert_eq!(first.expected_countdown, 8);
        assert_eq!(first.schedule_status, ScheduleStatus::Scheduled);
        assert_eq!(first.last_update, local("2018-02-19 22:12:43"));

        let second = &est.schedules[1];
        assert_eq!(second.expected_leave_time, local("2018-02-20 00:09:00"));
        assert_eq!(second.expected_countdown, -1);
        assert_eq!(second.schedule_status, ScheduleStatus::Delayed);
        assert!(!second.cancelled_trip);
        assert!(second.cancelled_stop);
        assert!(!second.added_trip);
        assert!(second.added_stop);
        assert_eq!(second.last_update, local("2018-02-19 22:20:00"));
    }

    #[test]
    fn decoding_twice_gives_equal_records() {
        let reference = local("2018-02-19 22:22:00");
        let a: Vec<StopEstimate> = decode_json(ESTIMATES, &reference).unwrap();
        let b: Vec<StopEstimate> = decode_json(ESTIMATES, &reference).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bad_leave_time_fails_the_estimate() {
        let body = ESTIMATES.replace("12:09am", "in a bit");
        let err = decode_json::<Vec<StopEstimate>>(&body, &local("2018-02-19 22:22:00")).unwrap_err();
        match err {
            DecodeError::Time { field, source } => {
                assert_eq!(field, "ExpectedLeaveTime");
                assert_eq!(source.value(), "in a bit");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_last_update_fails_the_estimate() {
        let body = ESTIMATES.replace("10:20:00 pm", "22:20");
        let err = decode_json::<Vec<StopEstimate>>(&body, &local("2018-02-19 22:22:00")).unwrap_err();
        assert!(matches!(err, DecodeError::Time { field: "LastUpdate", .. }));
    }

    #[test]
    fn missing_nested_field_fails_the_estimate() {
        let body = ESTIMATES.replacen("\"Pattern\": \"E1\",", "", 1);
        let err = decode_json::<Vec<StopEstimate>>(&body, &local("2018-02-19 22:22:00")).unwrap_err();
        assert!(err.to_string().contains("missing field `Pattern`"), "{err}");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let body = ESTIMATES.replace("\"*\"", "\"?\"");
        assert!(decode_json::<Vec<StopEstimate>>(&body, &local("2018-02-19 22:22:00")).is_err());
    }

    #[test]
    fn status_markers() {
        for status in [ScheduleStatus::Scheduled, ScheduleStatus::Delayed, ScheduleStatus::Ahead] {
            assert_eq!(status.as_str().parse::<ScheduleStatus>(), Ok(status));
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status)
            );
        }
    }
}
