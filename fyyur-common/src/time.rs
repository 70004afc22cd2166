//! Timestamp utilities
//!
//! Show classification (upcoming vs. past) and the two presentation styles
//! used when rendering show start times.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Naive layouts accepted by [`parse_timestamp`], interpreted as UTC
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// A show starting exactly at `now` is still upcoming.
pub fn is_upcoming(start_time: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    start_time >= now
}

/// Named presentation styles for show start times
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// `EEEE MMMM, d, y 'at' h:mma`, e.g. "Tuesday May, 21, 2019 at 9:30PM"
    Full,
    /// `EE MM, dd, y h:mma`, e.g. "Tue 05, 21, 2019 9:30PM"
    #[default]
    Medium,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            DateStyle::Full => "%A %B, %-d, %Y at %-I:%M%p",
            DateStyle::Medium => "%a %m, %d, %Y %-I:%M%p",
        }
    }
}

impl FromStr for DateStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => Ok(DateStyle::Full),
            "medium" => Ok(DateStyle::Medium),
            other => Err(Error::InvalidInput(format!("Unknown date style: {}", other))),
        }
    }
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateStyle::Full => f.write_str("full"),
            DateStyle::Medium => f.write_str("medium"),
        }
    }
}

/// Parse a raw timestamp string
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS[.f]]` (space or `T` separated,
/// read as UTC) and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(ts.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, layout) {
            return Ok(ts.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(Error::DateParse(raw.to_string()))
}

/// Render a timestamp in the given style (English names)
pub fn format_timestamp(ts: &DateTime<Utc>, style: DateStyle) -> String {
    ts.format(style.pattern()).to_string()
}

/// Parse `raw` and render it in `style`
///
/// Fails with [`Error::DateParse`] when `raw` is not a recognizable timestamp.
pub fn format_datetime(raw: &str, style: DateStyle) -> Result<String> {
    parse_timestamp(raw).map(|ts| format_timestamp(&ts, style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_now_returns_recent_timestamp() {
        let timestamp = now();
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
        assert!(timestamp.timestamp() < 4_102_444_800); // 2100-01-01 00:00:00 UTC
    }

    #[test]
    fn test_show_at_now_is_upcoming() {
        let now = at(2030, 1, 1, 20, 0);
        assert!(is_upcoming(&now, &now));
    }

    #[test]
    fn test_upcoming_boundary() {
        let now = at(2030, 1, 1, 20, 0);
        assert!(is_upcoming(&(now + Duration::seconds(1)), &now));
        assert!(!is_upcoming(&(now - Duration::seconds(1)), &now));
        assert!(!is_upcoming(&(now - Duration::nanoseconds(1)), &now));
    }

    #[test]
    fn test_medium_style() {
        let ts = at(2019, 5, 21, 21, 30);
        assert_eq!(format_timestamp(&ts, DateStyle::Medium), "Tue 05, 21, 2019 9:30PM");
    }

    #[test]
    fn test_full_style() {
        let ts = at(2019, 5, 21, 21, 30);
        assert_eq!(
            format_timestamp(&ts, DateStyle::Full),
            "Tuesday May, 21, 2019 at 9:30PM"
        );
    }

    #[test]
    fn test_morning_hours_are_not_padded() {
        let ts = at(2035, 4, 1, 8, 5);
        assert_eq!(format_timestamp(&ts, DateStyle::Medium), "Sun 04, 01, 2035 8:05AM");
        assert_eq!(format_timestamp(&ts, DateStyle::Full), "Sunday April, 1, 2035 at 8:05AM");
    }

    #[test]
    fn test_default_style_is_medium() {
        assert_eq!(DateStyle::default(), DateStyle::Medium);
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("full".parse::<DateStyle>().unwrap(), DateStyle::Full);
        assert_eq!("medium".parse::<DateStyle>().unwrap(), DateStyle::Medium);
        assert!("short".parse::<DateStyle>().is_err());
    }

    #[test]
    fn test_format_datetime_accepts_common_layouts() {
        let expected = "Tue 05, 21, 2019 9:30PM";
        for raw in [
            "2019-05-21 21:30:00",
            "2019-05-21 21:30:00.000000",
            "2019-05-21T21:30:00",
            "2019-05-21T21:30",
            "2019-05-21 21:30",
            "2019-05-21T21:30:00Z",
            "2019-05-21T21:30:00+00:00",
            "2019-05-21 21:30:00+00:00",
        ] {
            assert_eq!(format_datetime(raw, DateStyle::Medium).unwrap(), expected, "{}", raw);
        }
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        let formatted = format_datetime("2019-05-21T16:30:00-05:00", DateStyle::Medium).unwrap();
        assert_eq!(formatted, "Tue 05, 21, 2019 9:30PM");
    }

    #[test]
    fn test_bare_date_is_midnight() {
        let formatted = format_datetime("2019-05-21", DateStyle::Medium).unwrap();
        assert_eq!(formatted, "Tue 05, 21, 2019 12:00AM");
    }

    #[test]
    fn test_unparseable_input_fails() {
        for raw in ["", "not a date", "2019-13-45 10:00:00", "21/05/2019"] {
            let err = format_datetime(raw, DateStyle::Full).unwrap_err();
            assert!(matches!(err, Error::DateParse(_)), "{}", raw);
        }
    }
}
