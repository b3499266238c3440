//! Feature Vector Builder
//!
//! Turns a calendar date and clock time into the model's feature vector.
//! Day-of-week is counted Monday = 0 .. Sunday = 6.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::layout::WEEKEND_DAYS;
use super::vector::FeatureVector;
use super::FeatureError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Build a feature vector from `YYYY-MM-DD` and `HH:MM` strings
pub fn build(
    date: &str,
    time: &str,
    recent_activity: f32,
    temperature: f32,
) -> Result<FeatureVector, FeatureError> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    build_at(date.and_time(time), recent_activity, temperature)
}

/// Build a feature vector from an already parsed timestamp
pub fn build_at(
    timestamp: NaiveDateTime,
    recent_activity: f32,
    temperature: f32,
) -> Result<FeatureVector, FeatureError> {
    let hour = timestamp.hour() as u8;
    let day_of_week = day_index(timestamp.date());
    let is_weekend = WEEKEND_DAYS.contains(&day_of_week);

    FeatureVector::from_parts(hour, day_of_week, is_weekend, recent_activity, temperature)
}

/// Day-of-week index, Monday = 0
pub fn day_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

fn parse_date(raw: &str) -> Result<NaiveDate, FeatureError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| FeatureError::Parse(format!("invalid date '{}': {}", raw, e)))
}

fn parse_time(raw: &str) -> Result<NaiveTime, FeatureError> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| FeatureError::Parse(format!("invalid time '{}', expected HH:MM", raw)))
}
