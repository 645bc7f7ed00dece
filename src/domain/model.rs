use crate::utils::error::{PackError, Result};
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Postal address broken into the fields most carrier and payment APIs expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitAddress {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

/// Credentials carried by a `Basic` authorization header. Both parts are empty
/// when the header is missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicCredentials {
    pub user: String,
    pub pass: String,
}

impl BasicCredentials {
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.pass.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeOptions {
    pub prefix: Option<String>,
    pub length: usize,
    pub lower_case: bool,
    pub upper_case: bool,
    pub digits: bool,
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            length: 16,
            lower_case: true,
            upper_case: true,
            digits: true,
        }
    }
}

/// Zone local wall-clock text is expressed in: an IANA zone, with its DST
/// rules, or a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalZone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl Default for LocalZone {
    /// `America/Sao_Paulo`.
    fn default() -> Self {
        Self::Named(Tz::America__Sao_Paulo)
    }
}

impl LocalZone {
    /// Converts local wall-clock time to UTC. Times repeated when clocks go
    /// back resolve to the standard-time instant; times skipped when clocks
    /// go forward are rejected.
    pub fn to_utc(&self, local: &NaiveDateTime) -> Result<DateTime<Utc>> {
        let resolved = match self {
            Self::Named(tz) => to_utc_in(tz, local),
            Self::Fixed(offset) => to_utc_in(offset, local),
        };

        resolved.ok_or_else(|| PackError::DateParseError {
            value: local.to_string(),
            reason: format!("local time does not exist in {}", self),
        })
    }

    pub fn from_utc(&self, value: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Named(tz) => value.with_timezone(tz).naive_local(),
            Self::Fixed(offset) => value.with_timezone(offset).naive_local(),
        }
    }
}

fn to_utc_in<Z: TimeZone>(zone: &Z, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
    match zone.from_local_datetime(local) {
        LocalResult::Single(value) => Some(value.with_timezone(&Utc)),
        LocalResult::Ambiguous(_, latest) => Some(latest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

impl FromStr for LocalZone {
    type Err = PackError;

    /// Accepts an IANA identifier (`America/Santiago`) or an offset (`-04:00`).
    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Ok(tz) = value.parse::<Tz>() {
            return Ok(Self::Named(tz));
        }

        value
            .parse::<FixedOffset>()
            .map(Self::Fixed)
            .map_err(|e| PackError::invalid_argument(value, format!("not a time zone: {}", e)))
    }
}

impl fmt::Display for LocalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(tz) => f.write_str(tz.name()),
            Self::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_parse_zone() {
        assert_eq!(
            "America/Santiago".parse::<LocalZone>().unwrap(),
            LocalZone::Named(Tz::America__Santiago)
        );
        assert_eq!(
            " -04:00 ".parse::<LocalZone>().unwrap(),
            LocalZone::Fixed(FixedOffset::west_opt(4 * 3600).unwrap())
        );
        assert!("Brasilia".parse::<LocalZone>().is_err());
        assert_eq!(LocalZone::default().to_string(), "America/Sao_Paulo");
    }

    #[test]
    fn test_default_zone_follows_daylight_saving() {
        let zone = LocalZone::default();
        assert_eq!(
            zone.to_utc(&local("2019-01-22T13:00:00")).unwrap().to_rfc3339(),
            "2019-01-22T15:00:00+00:00"
        );
        assert_eq!(
            zone.to_utc(&local("2019-07-22T13:00:00")).unwrap().to_rfc3339(),
            "2019-07-22T16:00:00+00:00"
        );
    }

    #[test]
    fn test_repeated_hour_resolves_to_standard_time() {
        // Sao Paulo left DST at midnight on 2019-02-17, repeating 23:00-23:59.
        let zone = LocalZone::default();
        assert_eq!(
            zone.to_utc(&local("2019-02-16T23:30:00")).unwrap().to_rfc3339(),
            "2019-02-17T02:30:00+00:00"
        );
    }

    #[test]
    fn test_skipped_hour_is_rejected() {
        // Sao Paulo entered DST at midnight on 2018-11-04.
        let zone = LocalZone::default();
        assert!(matches!(
            zone.to_utc(&local("2018-11-04T00:30:00")),
            Err(PackError::DateParseError { .. })
        ));
    }

    #[test]
    fn test_from_utc() {
        let zone: LocalZone = "America/Santiago".parse().unwrap();
        let value = DateTime::parse_from_rfc3339("2019-07-22T17:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(zone.from_utc(&value), local("2019-07-22T13:00:00"));
    }
}
