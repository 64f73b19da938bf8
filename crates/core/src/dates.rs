//! Date and duration formatting for display fields.

use crate::types::Timestamp;

/// `Jan 5, 2024`.
pub fn format_date(ts: Timestamp) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// Coarse "time ago" label relative to `now`.
///
/// Falls back to [`format_date`] beyond 30 days and for future timestamps.
pub fn format_relative(ts: Timestamp, now: Timestamp) -> String {
    let elapsed = now.signed_duration_since(ts);
    if elapsed.num_seconds() < 0 {
        return format_date(ts);
    }
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days <= 30 {
        plural(days, "day")
    } else {
        format_date(ts)
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// `90` → `1h 30m`, `45` → `45m`, `120` → `2h`.
pub fn format_duration(minutes: i32) -> String {
    let minutes = minutes.max(0);
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn at(y: i32, mo: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn date_has_no_leading_zero() {
        assert_eq!(format_date(at(2024, 1, 5)), "Jan 5, 2024");
        assert_eq!(format_date(at(2023, 11, 30)), "Nov 30, 2023");
    }

    #[test]
    fn relative_labels() {
        let now = at(2024, 6, 15);
        assert_eq!(format_relative(now - Duration::seconds(20), now), "just now");
        assert_eq!(format_relative(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2 days ago");
    }

    #[test]
    fn relative_falls_back_to_date() {
        let now = at(2024, 6, 15);
        assert_eq!(format_relative(at(2024, 1, 5), now), "Jan 5, 2024");
        assert_eq!(format_relative(at(2024, 7, 1), now), "Jul 1, 2024");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(-5), "0m");
    }
}
