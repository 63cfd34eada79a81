//! Parsing of the partial local timestamps emitted by the RTTI API.
//!
//! RTTI never sends a UTC offset, and most of its times also lack a date. Both
//! parsers below therefore take a reference instant (normally "now") and splice
//! the parsed wall-clock time onto the reference's date in Vancouver time.

use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

/// TransLink's local time zone (Vancouver).
pub const TRANSLINK_TZ: Tz = chrono_tz::America::Vancouver;

const LEAVE_TIME_WITH_DATE: &str = "%I:%M%p %Y-%m-%d";
const LEAVE_TIME: &str = "%I:%M%p";
const LAST_UPDATE: &str = "%I:%M:%S %p";

/// A time string did not match the format RTTI uses for that field.
#[derive(Debug, Clone, Error)]
#[error("could not parse {value:?} as \"{format}\" ({source})")]
pub struct TimeParseError {
    value: String,
    format: &'static str,
    source: chrono::ParseError,
}

impl TimeParseError {
    fn new(value: &str, format: &'static str, source: chrono::ParseError) -> Self {
        TimeParseError {
            value: value.to_string(),
            format,
            source,
        }
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The `strftime`-style format the input was expected to match.
    pub fn format(&self) -> &'static str {
        self.format
    }
}

/// Parses an expected leave time such as `"9:59pm 2018-02-13"` or `"12:09am"`.
///
/// The dated form is taken as is. The short form is always placed on the day
/// after `reference`'s date, even if that wall-clock time is still ahead on the
/// reference day: `"10:00pm"` against 2018-02-13 23:00 gives 2018-02-14 22:00.
/// That mirrors how RTTI's short times behave in practice and is kept as is.
pub fn parse_leave_time<Z: TimeZone>(
    value: &str,
    reference: &DateTime<Z>,
) -> Result<DateTime<Tz>, TimeParseError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, LEAVE_TIME_WITH_DATE) {
        return Ok(localize(naive));
    }

    let time = NaiveTime::parse_from_str(value, LEAVE_TIME)
        .map_err(|err| TimeParseError::new(value, LEAVE_TIME, err))?;

    let date = local_date(reference) + Days::new(1);
    Ok(localize(date.and_time(time)))
}

/// Parses a last-update (or recorded) time such as `"08:53:10 pm"`.
///
/// The result is never later than `reference`. If splicing the time onto the
/// reference date lands in the future, the update happened the day before
/// (e.g. logged at 23:59 and read just after midnight).
pub fn parse_last_update<Z: TimeZone>(
    value: &str,
    reference: &DateTime<Z>,
) -> Result<DateTime<Tz>, TimeParseError> {
    let time = NaiveTime::parse_from_str(value, LAST_UPDATE)
        .map_err(|err| TimeParseError::new(value, LAST_UPDATE, err))?;

    let date = local_date(reference);
    let spliced = localize(date.and_time(time));
    if spliced.naive_utc() > reference.naive_utc() {
        return Ok(localize((date - Days::new(1)).and_time(time)));
    }

    Ok(spliced)
}

/// The current instant in TransLink's time zone.
pub fn now() -> DateTime<Tz> {
    chrono::Utc::now().with_timezone(&TRANSLINK_TZ)
}

/// Attaches Vancouver time to a wall-clock reading.
///
/// The repeated hour at the end of daylight time resolves to standard time.
/// A reading inside the skipped hour in spring is read with the standard offset,
/// so 02:30 on that day becomes 03:30 PDT.
pub(crate) fn localize(naive: NaiveDateTime) -> DateTime<Tz> {
    match TRANSLINK_TZ.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, standard) => standard,
        LocalResult::None => {
            let offset = TRANSLINK_TZ.offset_from_utc_datetime(&naive).fix();
            TRANSLINK_TZ.from_utc_datetime(&(naive - offset))
        }
    }
}

fn local_date<Z: TimeZone>(reference: &DateTime<Z>) -> NaiveDate {
    reference.with_timezone(&TRANSLINK_TZ).date_naive()
}
