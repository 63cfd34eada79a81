use crate::{ApiError, TimeParseError};
use thiserror::Error;

/// Longest body excerpt kept on a decode failure.
const BODY_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum Error {
    /// No HTTP response was obtained (connection, timeout, body read).
    /// The request URL, which holds the API key, is stripped from the source.
    #[error("Could not send request ({0}).")]
    Transport(reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{0}")]
    Api(Box<ApiError>),

    /// A successful response did not have the expected shape.
    #[error("Could not decode response ({0}).")]
    Decode(#[from] DecodeError),

    /// A download could not be written to its destination.
    #[error("Could not write download ({0}).")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration ({0}).")]
    Config(String),
}

impl Error {
    /// The normalized API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.without_url())
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(Box::new(err))
    }
}

/// A successful response body that failed strict decoding.
///
/// Missing required fields, wrongly typed values and unparseable times all end
/// up here. Nothing is defaulted: a 2xx body that does not decode usually means
/// the upstream contract changed.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{source} in body {body:?}")]
    Json {
        source: serde_json::Error,
        body: String,
    },

    #[error("field {field}: {source}")]
    Time {
        field: &'static str,
        source: TimeParseError,
    },

    #[error("header {name}: {reason}")]
    Header { name: &'static str, reason: String },

    #[error("field {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl DecodeError {
    pub(crate) fn json(source: serde_json::Error, body: &str) -> Self {
        DecodeError::Json {
            source,
            body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
        }
    }

    pub(crate) fn time(field: &'static str) -> impl FnOnce(TimeParseError) -> Self {
        move |source| DecodeError::Time { field, source }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DecodeError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
