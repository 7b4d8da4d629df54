use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parser for the date-time strings a link form produces
pub struct TimeParser;

/// Layouts emitted by `datetime-local` inputs and common hand-written variants
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

impl TimeParser {
    /// Parse a form date-time, supporting:
    /// - RFC3339: `2025-01-10T00:00:00Z`, `2025-01-10T02:00:00+02:00`
    /// - `datetime-local`: `2025-01-10T00:00`, `2025-01-10T00:00:30`
    /// - space separated: `2025-01-10 00:00`
    /// - date only: `2025-01-10` (midnight)
    ///
    /// RFC3339 values are converted to UTC; the other forms carry no zone
    /// and are compared as written.
    pub fn parse_form_datetime(input: &str) -> Result<NaiveDateTime, String> {
        let input = input.trim();

        if input.is_empty() {
            return Err("empty date-time".to_string());
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(dt.naive_utc());
        }

        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
                return Ok(dt);
            }
        }

        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| format!("Invalid date-time: '{}'", input))
    }
}
