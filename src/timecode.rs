//! Time codec for film timestamps and chat send times.
//!
//! Film data expresses times as `"HH:MM:SS"` (or `"MM:SS"`) strings while the
//! player works in seconds. Chat messages carry Unix epoch send times as
//! numeric strings that are shown as a short local clock label.

use chrono::{DateTime, Local, TimeZone};

/// Label shown for chat messages whose send time can't be interpreted.
pub const JUST_NOW: &str = "just now";

/// Epoch values below this are seconds, values at or above it are milliseconds.
pub const MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// Parse a `"HH:MM:SS"` or `"MM:SS"` timestamp into seconds.
///
/// Any other shape (empty, a single field, four fields, non-numeric parts)
/// yields `0`. Film data in the wild is sloppy and a bad timestamp must not
/// break loading.
///
/// # Examples
/// ```
/// use reelsync::timecode::parse_timestamp;
///
/// assert_eq!(parse_timestamp("01:02:03"), 3723);
/// assert_eq!(parse_timestamp("02:03"), 123);
/// assert_eq!(parse_timestamp("garbage"), 0);
/// ```
pub fn parse_timestamp(text: &str) -> u64 {
    let parts: Option<Vec<u64>> = text
        .trim()
        .split(':')
        .map(|part| part.trim().parse::<u64>().ok())
        .collect();

    let total = match parts.as_deref() {
        Some([h, m, s]) => hms_to_seconds(*h, *m, *s),
        Some([m, s]) => hms_to_seconds(0, *m, *s),
        _ => None,
    };
    total.unwrap_or(0)
}

/// Total seconds for hour, minute and second fields, `None` on overflow.
pub fn hms_to_seconds(hours: u64, minutes: u64, seconds: u64) -> Option<u64> {
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Parse a user-entered position: plain seconds (`"90"`, `"12.5"`) or a
/// timestamp accepted by [`parse_timestamp`].
pub fn parse_position(text: &str) -> f64 {
    let text = text.trim();
    match text.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => secs,
        Ok(_) => 0.0,
        Err(_) => parse_timestamp(text) as f64,
    }
}

/// Format seconds as `HH:MM:SS`.
///
/// Each field is floored and zero-padded to two digits. Hours are not
/// capped, so 100 hours renders as `100:00:00`. Negative input clamps to zero.
pub fn format_seconds(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let (h, m, s) = split_hms(total);
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Split whole seconds into (hours, minutes, seconds).
pub fn split_hms(total: u64) -> (u64, u64, u64) {
    (total / 3600, (total % 3600) / 60, total % 60)
}

/// Format a Unix send time (seconds or milliseconds) as a local `HH:MM` label.
///
/// Returns [`JUST_NOW`] for non-numeric, zero, or out-of-range input.
pub fn format_epoch_label(raw: &str) -> String {
    format_epoch_label_in(raw, &Local)
}

/// Same as [`format_epoch_label`] but in an explicit time zone.
pub fn format_epoch_label_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match epoch_millis(raw).and_then(DateTime::from_timestamp_millis) {
        Some(utc) => utc.with_timezone(tz).format("%H:%M").to_string(),
        None => JUST_NOW.to_string(),
    }
}

/// Interpret a numeric epoch string as milliseconds.
///
/// Values smaller than [`MILLIS_THRESHOLD`] are taken as seconds and scaled.
pub fn epoch_millis(raw: &str) -> Option<i64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value == 0.0 {
        return None;
    }
    let value = value as i64;
    if value.abs() < MILLIS_THRESHOLD {
        value.checked_mul(1000)
    } else {
        Some(value)
    }
}

/// Current Unix time in whole seconds, as sent in chat messages.
pub fn now_epoch_secs() -> String {
    Local::now().timestamp().to_string()
}
