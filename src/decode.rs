//! Strict decoding of successful response bodies.
//!
//! Each record's field table lives on the record itself as serde attributes.
//! Records holding RTTI local times cannot be built by serde alone, since those
//! times only mean something relative to a reference instant; they go through a
//! wire record first and are resolved here.

use crate::DecodeError;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::de::DeserializeOwned;

/// A record that can be decoded from a JSON response body.
pub trait Decode: Sized {
    /// What serde reads straight off the wire.
    type Wire: DeserializeOwned;

    /// Turns the wire record into the final one, given the instant the
    /// response is read at.
    fn resolve(wire: Self::Wire, reference: &DateTime<Tz>) -> Result<Self, DecodeError>;
}

impl<T: Decode> Decode for Vec<T> {
    type Wire = Vec<T::Wire>;

    fn resolve(wire: Self::Wire, reference: &DateTime<Tz>) -> Result<Self, DecodeError> {
        wire.into_iter()
            .map(|item| T::resolve(item, reference))
            .collect()
    }
}

/// Decodes `body` into `T`, reading any date-less times relative to `reference`.
///
/// Pure: the same body and reference always give the same record.
pub fn decode_json<T: Decode>(body: &str, reference: &DateTime<Tz>) -> Result<T, DecodeError> {
    let wire: T::Wire = serde_json::from_str(body).map_err(|err| DecodeError::json(err, body))?;
    T::resolve(wire, reference)
}

/// Implements [`Decode`] for records whose wire form is the record itself.
macro_rules! decode_as_is {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::decode::Decode for $ty {
                type Wire = $ty;

                fn resolve(
                    wire: Self::Wire,
                    _reference: &chrono::DateTime<chrono_tz::Tz>,
                ) -> Result<Self, $crate::DecodeError> {
                    Ok(wire)
                }
            }
        )+
    };
}

pub(crate) use decode_as_is;
