use chrono::{DateTime, TimeZone, Utc};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
/// Fixed 30-day month; no calendar adjustment.
const MONTH: f64 = 30.0 * DAY;

/// Format the time elapsed between `dt` and `now` as a relative time string
/// such as "5 minutes ago".
///
/// Counts are rounded to the nearest whole number, halves away from zero.
/// Timestamps in the future are clamped to "0 seconds ago".
pub fn relative_time<Tz: TimeZone>(dt: &DateTime<Tz>, now: &DateTime<Utc>) -> String {
    let seconds = elapsed_seconds(dt, now).max(0.0);

    if seconds < MINUTE {
        return format!("{:.0} seconds ago", seconds.round());
    }

    if seconds < HOUR {
        return format!("{:.0} minutes ago", (seconds / MINUTE).round());
    }

    if seconds < DAY {
        return format!("{:.0} hours ago", (seconds / HOUR).round());
    }

    if seconds < MONTH {
        return format!("{:.0} days ago", (seconds / DAY).round());
    }

    format!("{:.0} months ago", (seconds / MONTH).round())
}

fn elapsed_seconds<Tz: TimeZone>(dt: &DateTime<Tz>, now: &DateTime<Utc>) -> f64 {
    let duration = now.signed_duration_since(dt);
    match duration.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        // Out of microsecond range (hundreds of thousands of years).
        None => duration.num_seconds() as f64,
    }
}
