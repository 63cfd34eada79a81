use crate::decode::decode_as_is;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of one RTTI service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Status {
    /// "Location" or "Schedule".
    pub name: String,

    /// "Online" or "Offline".
    pub value: String,
}

impl Status {
    pub fn is_online(&self) -> bool {
        self.value.eq_ignore_ascii_case("online")
    }
}

decode_as_is!(Status);

/// Which RTTI service to ask [`Rtti::status`](crate::Rtti::status) about.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub enum StatusService {
    /// Bus location and real-time schedule information.
    #[default]
    All,
    Location,
    Schedule,
    /// Any other name, passed through unchanged (RTTI answers error 5001 for
    /// names it does not know).
    Other(String),
}

impl StatusService {
    pub fn as_str(&self) -> &str {
        match self {
            StatusService::All => "all",
            StatusService::Location => "location",
            StatusService::Schedule => "schedule",
            StatusService::Other(name) => name,
        }
    }
}

impl From<&str> for StatusService {
    fn from(name: &str) -> Self {
        match name {
            "all" => StatusService::All,
            "location" => StatusService::Location,
            "schedule" => StatusService::Schedule,
            other => StatusService::Other(other.to_string()),
        }
    }
}

impl fmt::Display for StatusService {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
