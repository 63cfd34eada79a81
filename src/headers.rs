use crate::DecodeError;
use chrono::{DateTime, Utc};
use reqwest::header::{
    HeaderMap, HeaderName, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, DATE, SERVER,
};
use serde::Serialize;

/// HTTP headers of a GTFS-realtime feed file.
///
/// Every header is optional; one that is present must parse.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Headers {
    pub content_disposition: Option<String>,

    pub content_length: Option<u64>,

    pub content_type: Option<String>,

    /// Parsed `Date` header.
    pub date: Option<DateTime<Utc>>,

    pub server: Option<String>,
}

impl Headers {
    pub fn from_header_map(headers: &HeaderMap) -> Result<Headers, DecodeError> {
        let content_length = header(headers, &CONTENT_LENGTH, "Content-Length")?
            .map(|value| {
                value.trim().parse::<u64>().map_err(|err| DecodeError::Header {
                    name: "Content-Length",
                    reason: format!("{value:?} is not a byte count ({err})"),
                })
            })
            .transpose()?;

        let date = header(headers, &DATE, "Date")?
            .map(|value| {
                DateTime::parse_from_rfc2822(&value)
                    .map(|date| date.with_timezone(&Utc))
                    .map_err(|err| DecodeError::Header {
                        name: "Date",
                        reason: format!("{value:?} is not an RFC 2822 date ({err})"),
                    })
            })
            .transpose()?;

        Ok(Headers {
            content_disposition: header(headers, &CONTENT_DISPOSITION, "Content-Disposition")?,
            content_length,
            content_type: header(headers, &CONTENT_TYPE, "Content-Type")?,
            date,
            server: header(headers, &SERVER, "Server")?,
        })
    }
}

fn header(
    headers: &HeaderMap,
    key: &HeaderName,
    name: &'static str,
) -> Result<Option<String>, DecodeError> {
    headers
        .get(key)
        .map(|value| {
            value
                .to_str()
                .map(str::to_string)
                .map_err(|err| DecodeError::Header {
                    name,
                    reason: err.to_string(),
                })
        })
        .transpose()
}
