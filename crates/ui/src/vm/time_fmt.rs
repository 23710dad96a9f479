use chrono::{DateTime, Utc};
use quiz_core::format_countdown;

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[must_use]
pub fn format_time_left(seconds: u32) -> String {
    format!("Time Left: {}", format_countdown(seconds))
}
