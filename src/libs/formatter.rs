//! Display formatting for hours and timestamps.
//!
//! All durations in this application are fractional business hours; these
//! helpers turn them into the "HH:MM" strings used by tables and messages,
//! and render absolute instants in the calendar's local timezone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Formats fractional hours as a signed "HH:MM" string.
///
/// Negative values keep their sign, which is how overdue remaining time is
/// shown: `-2.25` becomes `"-02:15"`.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let sign = if total_minutes < 0 { "-" } else { "" };
    let magnitude = total_minutes.abs();
    format!("{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60)
}

/// Renders an instant as local wall-clock time in the given zone.
pub fn format_local(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}
