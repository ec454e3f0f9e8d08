//! Due-date text handling shared by the task snapshot and the date field.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{Result, ViewError};

pub const DUE_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse `YYYY-MM-DD HH:MM`, falling back to `YYYY-MM-DD` at midnight.
///
/// Blank input means "no due date" and yields `Ok(None)`.
pub fn parse_due(input: &str) -> Result<Option<NaiveDateTime>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, DUE_DATE_TIME_FORMAT) {
        return Ok(Some(dt));
    }
    NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT)
        .map(|date| Some(date.and_time(NaiveTime::MIN)))
        .map_err(|_| ViewError::InvalidDate(trimmed.to_string()))
}

pub fn format_due(dt: &NaiveDateTime) -> String {
    dt.format(DUE_DATE_TIME_FORMAT).to_string()
}

pub(crate) fn serialize<S>(due: &Option<NaiveDateTime>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match due {
        Some(dt) => serializer.serialize_some(&format_due(dt)),
        None => serializer.serialize_none(),
    }
}

/// Accepts the two display formats plus ISO-8601 (`2025-06-01T14:30:00`).
pub(crate) fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(dt));
    }
    parse_due(&raw).map_err(serde::de::Error::custom)
}
