//! Date and date-time conversion between UTC values and the local wall-clock
//! text clients send and expect.
//!
//! JSON carries naive local times (`2019-07-22T13:00:00`); Rust code keeps
//! `DateTime<Utc>`. The zone comes from a [`TimeZoneProvider`],
//! `America/Sao_Paulo` when none is configured.
//!
//! Fields typed [`LocalDateTime`] or [`LocalDate`] (or annotated with the
//! `with` modules below) are written and read through the date converters of
//! the active [`JsonSettings`](super::JsonSettings).

use crate::domain::model::LocalZone;
use crate::domain::ports::TimeZoneProvider;
use crate::utils::error::{PackError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Offset, SecondsFormat, Utc};
use reqwest::header::HeaderMap;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub(crate) const LOCAL_DATE_TIME_TOKEN: &str = "$pack_utils::LocalDateTime";
pub(crate) const LOCAL_DATE_TOKEN: &str = "$pack_utils::LocalDate";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn default_zone() -> LocalZone {
    LocalZone::default()
}

#[derive(Clone, Default)]
pub struct DateTimeConverter {
    provider: Option<Arc<dyn TimeZoneProvider>>,
}

impl fmt::Debug for DateTimeConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeConverter")
            .field("zone", &self.zone())
            .finish()
    }
}

/// Converters are equal when they share the same provider.
impl PartialEq for DateTimeConverter {
    fn eq(&self, other: &Self) -> bool {
        match (&self.provider, &other.provider) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for DateTimeConverter {}

impl DateTimeConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zone resolved on every conversion, e.g. from the current request.
    pub fn with_provider<P: TimeZoneProvider + 'static>(provider: P) -> Self {
        Self {
            provider: Some(Arc::new(provider)),
        }
    }

    pub fn with_zone(zone: LocalZone) -> Self {
        Self::with_provider(move || zone)
    }

    pub fn utc() -> Self {
        Self::with_zone(LocalZone::Fixed(Utc.fix()))
    }

    pub fn zone(&self) -> LocalZone {
        self.provider
            .as_ref()
            .map(|provider| provider.zone())
            .unwrap_or_default()
    }

    /// Parses local text into UTC. Blank input yields `Ok(None)`; text with
    /// an explicit offset is converted as is.
    pub fn read(&self, value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
        let Some(text) = value.map(str::trim).filter(|text| !text.is_empty()) else {
            return Ok(None);
        };

        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Ok(Some(parsed.with_timezone(&Utc)));
        }

        let naive = parse_naive(text)?;
        self.zone().to_utc(&naive).map(Some)
    }

    /// Formats a UTC value as local naive text.
    pub fn write(&self, value: &DateTime<Utc>) -> String {
        self.zone()
            .from_utc(value)
            .format(LOCAL_DATE_TIME_FORMAT)
            .to_string()
    }
}

fn parse_naive(text: &str) -> Result<NaiveDateTime> {
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(text, DEFAULT_DATE_FORMAT)
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| PackError::DateParseError {
            value: text.to_string(),
            reason: e.to_string(),
        })
}

/// Date-only conversion; the time part of the input is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateConverter {
    format: Option<String>,
}

impl DateConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
        }
    }

    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }

    pub fn read(&self, value: Option<&str>) -> Result<Option<NaiveDate>> {
        let Some(text) = value.map(str::trim).filter(|text| !text.is_empty()) else {
            return Ok(None);
        };

        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Ok(Some(parsed.date_naive()));
        }
        if let Ok(parsed) = NaiveDate::parse_from_str(text, self.format()) {
            return Ok(Some(parsed));
        }
        parse_naive(text).map(|naive| Some(naive.date()))
    }

    pub fn write(&self, value: &NaiveDate) -> String {
        value.format(self.format()).to_string()
    }
}

/// Reads the zone from `header_name`, as an IANA identifier
/// (`America/Santiago`) or an offset (`-04:00`). Missing or unknown values
/// fall back to [`default_zone`].
pub fn zone_from_headers(headers: &HeaderMap, header_name: &str) -> LocalZone {
    let raw = headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match raw.map(|value| (value, value.parse::<LocalZone>())) {
        Some((_, Ok(zone))) => zone,
        Some((value, Err(e))) => {
            debug!("Invalid time zone header `{}`: {}", value, e);
            default_zone()
        }
        None => default_zone(),
    }
}

pub(crate) fn to_canonical_text(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// UTC date-time exchanged as local wall-clock text.
///
/// Outside [`JsonSettings`](super::JsonSettings) it is written as RFC 3339 in
/// UTC and naive input is read in [`default_zone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDateTime(pub DateTime<Utc>);

/// Calendar date exchanged in the configured date format, `%Y-%m-%d` outside
/// [`JsonSettings`](super::JsonSettings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDate(pub NaiveDate);

impl From<DateTime<Utc>> for LocalDateTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<NaiveDate> for LocalDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Serialize for LocalDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(LOCAL_DATE_TIME_TOKEN, &to_canonical_text(&self.0))
    }
}

impl Serialize for LocalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let text = self.0.format(DEFAULT_DATE_FORMAT).to_string();
        serializer.serialize_newtype_struct(LOCAL_DATE_TOKEN, &text)
    }
}

/// Blank text reads as `None`.
struct OptionalDateTime(Option<DateTime<Utc>>);

struct OptionalDate(Option<NaiveDate>);

impl<'de> Deserialize<'de> for OptionalDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = deserializer.deserialize_newtype_struct(LOCAL_DATE_TIME_TOKEN, TextVisitor)?;
        DateTimeConverter::new()
            .read(text.as_deref())
            .map(OptionalDateTime)
            .map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for OptionalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = deserializer.deserialize_newtype_struct(LOCAL_DATE_TOKEN, TextVisitor)?;
        DateConverter::new()
            .read(text.as_deref())
            .map(OptionalDate)
            .map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for LocalDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        OptionalDateTime::deserialize(deserializer)?
            .0
            .map(LocalDateTime)
            .ok_or_else(|| de::Error::custom("empty date-time"))
    }
}

impl<'de> Deserialize<'de> for LocalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        OptionalDate::deserialize(deserializer)?
            .0
            .map(LocalDate)
            .ok_or_else(|| de::Error::custom("empty date"))
    }
}

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a date or date-time string")
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        Option::<String>::deserialize(deserializer)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
        Ok(Some(value.to_owned()))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }
}

/// `#[serde(with = "pack_utils::core::json::dates::local_date_time")]` for
/// plain `DateTime<Utc>` fields, handled like [`LocalDateTime`].
pub mod local_date_time {
    use super::LocalDateTime;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        LocalDateTime(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        LocalDateTime::deserialize(deserializer).map(|value| value.0)
    }

    /// Null or blank text reads as `None`.
    pub mod option {
        use super::super::{LocalDateTime, OptionalDateTime};
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            value.map(LocalDateTime).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Ok(Option::<OptionalDateTime>::deserialize(deserializer)?.and_then(|value| value.0))
        }
    }
}

/// `#[serde(with = "pack_utils::core::json::dates::date_only")]` for plain
/// `NaiveDate` fields, handled like [`LocalDate`].
pub mod date_only {
    use super::LocalDate;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        LocalDate(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        LocalDate::deserialize(deserializer).map(|value| value.0)
    }

    pub mod option {
        use super::super::{LocalDate, OptionalDate};
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            value.map(LocalDate).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            Ok(Option::<OptionalDate>::deserialize(deserializer)?.and_then(|value| value.0))
        }
    }
}
