//! Timestamp parsing and display.
//!
//! Feed timestamps are UTC. Everything shown to the user is India Standard
//! Time, a fixed +05:30 with no daylight saving. Calendar matching works on
//! the unshifted UTC date instead, so a 20:00Z start stays on its own day in
//! the grid even though it displays as 01:30 the next morning.

use crate::{ApiError, ApiResult, DateSpan};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Utc};

/// +05:30, in minutes.
pub const DISPLAY_OFFSET_MINUTES: i64 = 5 * 60 + 30;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Wall-clock time in the display zone.
pub type DisplayInstant = NaiveDateTime;

/// Parse a feed timestamp into a UTC instant.
///
/// Accepts RFC 3339, naive date-times (read as UTC) and bare dates (UTC midnight).
pub fn parse_instant(raw: &str) -> ApiResult<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ApiError::InvalidTimestamp(raw.to_owned()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ApiError::InvalidTimestamp(raw.to_owned()))
}

/// Shift a UTC instant into display wall-clock time.
pub fn shift_for_display(at: DateTime<Utc>) -> DisplayInstant {
    (at + TimeDelta::minutes(DISPLAY_OFFSET_MINUTES)).naive_utc()
}

pub fn to_display_instant(raw: &str) -> ApiResult<DisplayInstant> {
    parse_instant(raw).map(shift_for_display)
}

/// `05 Aug 2025`
pub fn format_date(instant: DisplayInstant) -> String {
    instant.format("%d %b %Y").to_string()
}

/// `03:30 PM`
pub fn format_time(instant: DisplayInstant) -> String {
    instant.format("%I:%M %p").to_string().to_uppercase()
}

/// `05 Aug 2025 - 07 Aug 2025`
pub fn format_span(span: DateSpan) -> String {
    format!(
        "{} - {}",
        format_date(shift_for_display(span.start)),
        format_date(shift_for_display(span.end))
    )
}

/// Display instant for `raw`, or for `fallback` when `raw` is unusable.
pub fn display_or_fallback(raw: &str, fallback: &str) -> ApiResult<DisplayInstant> {
    to_display_instant(raw).or_else(|_| to_display_instant(fallback))
}

/// UTC calendar date of a feed timestamp, without the display shift.
pub fn utc_date(raw: &str) -> ApiResult<NaiveDate> {
    parse_instant(raw).map(|dt| dt.date_naive())
}

/// Day of month (1–31) of a feed timestamp, without the display shift.
pub fn day_of_month(raw: &str) -> ApiResult<u32> {
    utc_date(raw).map(|d| d.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn parses_supported_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 8, 5, 10, 0, 0).unwrap();
        assert_eq!(parse_instant("2025-08-05T10:00:00Z").unwrap(), expected);
        assert_eq!(parse_instant("2025-08-05T15:30:00+05:30").unwrap(), expected);
        assert_eq!(parse_instant("2025-08-05T10:00:00").unwrap(), expected);
        assert_eq!(parse_instant("2025-08-05 10:00:00").unwrap(), expected);
        assert_eq!(parse_instant(" 2025-08-05T10:00:00.000Z ").unwrap(), expected);
        assert_eq!(
            parse_instant("2025-08-05").unwrap(),
            Utc.with_ymd_and_hms(2025, 8, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "   ", "tomorrow", "2025-13-01", "2025-02-30T10:00:00Z"] {
            assert!(
                matches!(parse_instant(raw), Err(ApiError::InvalidTimestamp(_))),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn display_shift_is_five_thirty() {
        let shown = to_display_instant("2025-08-05T10:00:00Z").unwrap();
        assert_eq!((shown.hour(), shown.minute()), (15, 30));
        assert_eq!(format_time(shown), "03:30 PM");
        assert_eq!(format_date(shown), "05 Aug 2025");
    }

    #[test]
    fn late_evening_rolls_display_date_but_not_grid_day() {
        let raw = "2025-08-05T20:00:00Z";
        let shown = to_display_instant(raw).unwrap();
        assert_eq!(format_date(shown), "06 Aug 2025");
        assert_eq!(format_time(shown), "01:30 AM");
        assert_eq!(day_of_month(raw).unwrap(), 5);
    }

    #[test]
    fn day_of_month_is_unshifted() {
        assert_eq!(day_of_month("2025-08-05T10:00:00Z").unwrap(), 5);
        assert!(day_of_month("n/a").is_err());
    }

    #[test]
    fn span_formatting_uses_display_zone() {
        let span = DateSpan {
            start: Utc.with_ymd_and_hms(2025, 8, 5, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 8, 7, 19, 0, 0).unwrap(),
        };
        assert_eq!(format_span(span), "05 Aug 2025 - 08 Aug 2025");
    }

    #[test]
    fn fallback_is_used_for_unusable_match_time() {
        let shown = display_or_fallback("", "2025-09-01T04:00:00Z").unwrap();
        assert_eq!(format_time(shown), "09:30 AM");
        assert!(display_or_fallback("x", "y").is_err());
    }
}
