//! Timestamp utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp's date portion as `YYYY-MM-DD`
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Format a timestamp's time portion as `HH:MM:SS`
pub fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%H:%M:%S").to_string()
}

/// Parse a `YYYY-MM-DD` date string.
///
/// Returns `None` for unparseable input; callers store NULL rather
/// than rejecting the surrounding record.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_date_and_time_formatting() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 30).unwrap();
        assert_eq!(format_date(ts), "2024-03-07");
        assert_eq!(format_time(ts), "09:05:30");
    }

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("2024-12-31").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_parse_date_invalid_returns_none() {
        assert!(parse_date("31/12/2024").is_none());
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("not a date").is_none());
    }
}
