use crate::decode::decode_as_is;
use crate::RouteMap;
use serde::{Deserialize, Serialize};

/// A sequenced pattern of service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    /// RTTI pads numeric routes to three digits ("002").
    pub route_no: String,

    pub name: String,

    pub operating_company: String,

    pub patterns: Vec<Pattern>,
}

/// A trip-path variant of a route.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Pattern {
    pub pattern_no: String,

    pub destination: String,

    pub route_map: RouteMap,

    pub direction: String,
}

decode_as_is!(Route);
