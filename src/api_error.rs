use crate::ErrorCode;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// An error response from one of the TransLink APIs.
///
/// Built from any non-success response, whatever its body holds. `code` is
/// only ever filled in by RTTI. `message` is empty when the body is not a JSON
/// object with a `Message` (GTFS-realtime answers a bad key with no JSON at
/// all, for instance).
#[derive(Debug, Clone, Error)]
#[error("{}", self.summary())]
pub struct ApiError {
    pub status_code: u16,

    pub code: String,

    pub message: String,

    /// URL of the failed request, without the `apikey` parameter.
    pub url: Url,

    pub headers: HeaderMap,

    pub body: Bytes,
}

impl ApiError {
    /// Normalizes a failed response. Never fails, whatever the body holds.
    pub fn from_response_parts(url: Url, status_code: u16, headers: HeaderMap, body: Bytes) -> Self {
        let (code, message) = match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(fields)) => (
                fields.get("Code").map(text).unwrap_or_default(),
                fields.get("Message").map(text).unwrap_or_default(),
            ),
            _ => (String::new(), String::new()),
        };

        ApiError {
            status_code,
            code,
            message,
            url: without_api_key(url),
            headers,
            body,
        }
    }

    /// The documented RTTI error code, if the response carried a known one.
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_code(&self.code)
    }

    /// The documented description of the error code, or empty.
    pub fn description(&self) -> &'static str {
        self.error_code().map(ErrorCode::description).unwrap_or("")
    }

    /// One-line human readable summary, e.g. `HTTP 400 Error: code 1012 'No stops found'`.
    pub fn summary(&self) -> String {
        let mut summary = format!("HTTP {} Error", self.status_code);
        if self.code.is_empty() && self.message.is_empty() {
            return summary;
        }

        summary.push(':');
        if !self.code.is_empty() {
            summary.push_str(&format!(" code {}", self.code));
        }
        if !self.message.is_empty() {
            summary.push_str(&format!(" '{}'", self.message));
        }
        summary
    }
}

fn without_api_key(mut url: Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| *name != "apikey")
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
