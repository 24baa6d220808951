//! Lenient timestamp decoding.
//!
//! The backend emits RFC 3339 strings for timezone-aware columns and naive
//! ISO strings (`2025-03-01T10:15:00.123456`) for the rest. Naive values are
//! taken as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a backend timestamp string into UTC.
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// `#[serde(with = "vmd_schemas::timestamp::option")]`
pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => s.serialize_some(&dt.to_rfc3339()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_utc(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unparseable timestamp: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rfc3339_with_offset_is_normalized() {
        let dt = parse_utc("2025-03-01T13:00:00+03:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn naive_iso_is_taken_as_utc() {
        let dt = parse_utc("2025-03-01T10:00:00.250000").unwrap();
        assert_eq!(dt.timestamp(), Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap().timestamp());

        assert!(parse_utc("2025-03-01 10:00:00").is_some());
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_utc("yesterday"), None);
    }
}
