//! Date/time display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M %Z";

/// Formats a `Timestamp` in the system timezone as `YYYY-MM-DD HH:MM TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(TimeZone::system()).strftime(LOCAL_FORMAT)
        )
    }
}

/// Formats a stored ISO-8601 date string.
///
/// Strings that parse as an instant are shown in local time; anything else
/// is printed verbatim so hand-edited values stay visible.
pub struct StoredDate<'a>(pub &'a str);

impl fmt::Display for StoredDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.parse::<Timestamp>() {
            Ok(ts) => write!(f, "{}", LocalDateTime(&ts)),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparseable_dates_are_shown_verbatim() {
        assert_eq!(StoredDate("someday").to_string(), "someday");
    }

    #[test]
    fn test_parseable_dates_are_reformatted() {
        // Zone abbreviations such as "UTC" may contain a 'T', so check the shape
        let out = StoredDate("2025-12-01T12:00:00.000Z").to_string();
        assert!(out.starts_with("2025-12-0"));
        assert_eq!(out.as_bytes()[10], b' ');
        assert!(!out.contains("T12:00"));
        assert!(!out.contains(".000Z"));
    }
}
