use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Current UTC wall clock, truncated to microseconds. Postgres and SQLite
/// keep that precision natively; the MySQL schema declares `DATETIME(6)`.
pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// `now - age`, saturating at the earliest representable timestamp.
pub fn older_than(now: NaiveDateTime, age: Duration) -> NaiveDateTime {
    chrono::Duration::from_std(age)
        .ok()
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Parse an ISO-8601 timestamp. Offset-qualified values are converted to
/// naive UTC; naive values are taken as-is.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| format!("invalid datetime '{}'", raw))
}

pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parses_naive_iso() {
        let dt = parse_timestamp("2024-01-01T00:00:00").unwrap();
        assert_eq!(dt, ymd_hms(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn parses_fractional_seconds() {
        let dt = parse_timestamp("2024-01-01T10:20:30.250").unwrap();
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn parses_space_separator() {
        let dt = parse_timestamp("2024-03-05 12:00:00").unwrap();
        assert_eq!(dt, ymd_hms(2024, 3, 5, 12, 0, 0));
    }

    #[test]
    fn offset_is_normalised_to_utc() {
        let dt = parse_timestamp("2024-01-01T09:00:00+09:00").unwrap();
        assert_eq!(dt, ymd_hms(2024, 1, 1, 0, 0, 0));

        let dt = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(dt, ymd_hms(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn older_than_subtracts_age() {
        let now = ymd_hms(2024, 1, 1, 0, 1, 0);
        let threshold = older_than(now, Duration::from_secs(30));
        assert_eq!(threshold, ymd_hms(2024, 1, 1, 0, 0, 30));
    }

    #[test]
    fn older_than_saturates() {
        let now = ymd_hms(2024, 1, 1, 0, 0, 0);
        assert_eq!(older_than(now, Duration::MAX), NaiveDateTime::MIN);
    }
}
