//! Serialization of transaction date-times as "YYYY-MM-DD HH:MM:SS".
//!
//! Browsers submit `datetime-local` inputs as "YYYY-MM-DDTHH:MM", so the
//! deserializer also accepts that and the "T"-separated form with seconds.

use serde::{Deserialize, Deserializer, Serializer};
use time::{
    PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

/// Date time format used for the API and the database, e.g. "2024-03-15 14:30:00".
pub const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const BROWSER_DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

const ISO_DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Parse a date-time in any of the accepted input formats.
pub fn parse_date_time(text: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(text, DATE_TIME_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(text, ISO_DATE_TIME_FORMAT))
        .or_else(|_| PrimitiveDateTime::parse(text, BROWSER_DATE_TIME_FORMAT))
}

/// Format `date_time` the way it is stored and sent to clients.
pub fn format_date_time(date_time: &PrimitiveDateTime) -> Result<String, time::error::Format> {
    date_time.format(DATE_TIME_FORMAT)
}

pub fn serialize<S>(date_time: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = format_date_time(date_time).map_err(serde::ser::Error::custom)?;

    serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_date_time(&s).map_err(serde::de::Error::custom)
}
