//! Scalar coercions for record fields.
//!
//! TransLink is loose about scalar types: numbers sometimes arrive as strings,
//! booleans as 0/1. Each function here is attached to a field with
//! `#[serde(deserialize_with = "...")]`. Because of that attribute the field
//! stays required even when its type is an `Option`; the nullable variants only
//! turn an explicit `null` into `None`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Copy)]
struct IntegerVisitor;

impl<'de> Visitor<'de> for IntegerVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a string holding one")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        // i64::MAX as f64 rounds up, so the upper bound is exclusive.
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        v.trim()
            .parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

#[derive(Clone, Copy)]
struct FloatVisitor;

impl<'de> Visitor<'de> for FloatVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a string holding one")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        match v.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(parsed),
            _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

#[derive(Clone, Copy)]
struct BooleanVisitor;

impl<'de> Visitor<'de> for BooleanVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean, 0 or 1, or a string such as \"true\" or \"no\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(Unexpected::Signed(v), &self)),
        }
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        match v.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
            _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

/// Wraps a scalar visitor so that `null` reads as `None`.
struct Nullable<V>(V);

impl<'de, V: Visitor<'de>> Visitor<'de> for Nullable<V> {
    type Value = Option<V::Value>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("null or ")?;
        self.0.expecting(f)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self.0).map(Some)
    }
}

fn narrow<T: TryFrom<i64>, E: de::Error>(value: i64) -> Result<T, E> {
    T::try_from(value).map_err(|_| E::invalid_value(Unexpected::Signed(value), &"an integer in range"))
}

pub(crate) fn integer<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    narrow(deserializer.deserialize_any(IntegerVisitor)?)
}

pub(crate) fn nullable_integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    deserializer
        .deserialize_option(Nullable(IntegerVisitor))?
        .map(narrow::<T, D::Error>)
        .transpose()
}

pub(crate) fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    deserializer.deserialize_any(FloatVisitor)
}

pub(crate) fn nullable_float<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    deserializer.deserialize_option(Nullable(FloatVisitor))
}

pub(crate) fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    deserializer.deserialize_any(BooleanVisitor)
}

/// RTDS `timestampUtc`: RFC 3339, or an ISO 8601 date-time without offset
/// which is then already UTC.
pub(crate) fn nullable_utc_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(value) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    parse_utc_timestamp(&value)
        .map(Some)
        .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&value), &"an ISO 8601 timestamp"))
}

fn parse_utc_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    struct Fields {
        #[serde(deserialize_with = "integer")]
        int: i32,
        #[serde(deserialize_with = "float")]
        float: f64,
        #[serde(deserialize_with = "boolean")]
        flag: bool,
        #[serde(deserialize_with = "nullable_integer")]
        maybe_int: Option<u8>,
        #[serde(deserialize_with = "nullable_float")]
        maybe_float: Option<f64>,
        #[serde(deserialize_with = "nullable_utc_timestamp")]
        stamp: Option<DateTime<Utc>>,
    }

    fn fields(json: &str) -> Result<Fields, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn native_types() {
        let f = fields(
            r#"{"int": -1, "float": 49.2, "flag": true, "maybe_int": 80,
                "maybe_float": 3, "stamp": "2018-02-20T06:05:00Z"}"#,
        )
        .unwrap();
        assert_eq!(f.int, -1);
        assert_eq!(f.float, 49.2);
        assert!(f.flag);
        assert_eq!(f.maybe_int, Some(80));
        assert_eq!(f.maybe_float, Some(3.0));
        assert_eq!(f.stamp, Some(Utc.with_ymd_and_hms(2018, 2, 20, 6, 5, 0).unwrap()));
    }

    #[test]
    fn numbers_in_strings() {
        let f = fields(
            r#"{"int": " 53095 ", "float": "-123.108800", "flag": "False", "maybe_int": "7",
                "maybe_float": "12.5", "stamp": null}"#,
        )
        .unwrap();
        assert_eq!(f.int, 53095);
        assert_eq!(f.float, -123.1088);
        assert!(!f.flag);
        assert_eq!(f.maybe_int, Some(7));
        assert_eq!(f.maybe_float, Some(12.5));
        assert_eq!(f.stamp, None);
    }

    #[test]
    fn integral_float_is_an_integer() {
        let f = fields(
            r#"{"int": 4.0, "float": 0, "flag": 1, "maybe_int": null,
                "maybe_float": null, "stamp": "2018-02-20T06:05:00.123"}"#,
        )
        .unwrap();
        assert_eq!(f.int, 4);
        assert!(f.flag);
        assert_eq!(f.maybe_int, None);
        assert_eq!(f.maybe_float, None);
        assert_eq!(f.stamp.unwrap().timestamp_subsec_millis(), 123);
    }

    #[test]
    fn nullable_fields_are_still_required() {
        let err = fields(r#"{"int": 1, "float": 1, "flag": true, "maybe_int": 1, "stamp": null}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing field `maybe_float`"));
    }

    #[test]
    fn rejects() {
        let base = |int: &str, flag: &str, maybe_int: &str, stamp: &str| {
            format!(
                r#"{{"int": {int}, "float": 1, "flag": {flag}, "maybe_int": {maybe_int},
                    "maybe_float": null, "stamp": {stamp}}}"#
            )
        };
        assert!(fields(&base("1.5", "true", "1", "null")).is_err());
        assert!(fields(&base("\"abc\"", "true", "1", "null")).is_err());
        assert!(fields(&base("1", "2", "1", "null")).is_err());
        assert!(fields(&base("1", "\"maybe\"", "1", "null")).is_err());
        assert!(fields(&base("1", "true", "300", "null")).is_err());
        assert!(fields(&base("1", "true", "1", "\"yesterday\"")).is_err());
        assert!(fields(&base("1", "true", "1", "null")).is_ok());
    }

    #[test]
    fn float_rejects_non_finite_strings() {
        let err = fields(
            r#"{"int": 1, "float": "NaN", "flag": true, "maybe_int": null,
                "maybe_float": null, "stamp": null}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("NaN"));
    }
}
