//! Feature Vector - Core data structure for model input
//!
//! A `FeatureVector` can only be built through validated constructors, so the
//! column order and value ranges of [`FEATURE_LAYOUT`] always hold.

use serde::{Deserialize, Serialize};

use super::layout::{
    feature_name, FEATURE_COUNT, FEATURE_LAYOUT, WEEKEND_DAYS,
    HOUR, DAY_OF_WEEK, IS_WEEKEND, RECENT_ACTIVITY, TEMPERATURE,
};
use super::FeatureError;

/// Ordered model input: `[Hour, Day of Week, Is Weekend, Recent Activity, Temperature]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    values: [f32; FEATURE_COUNT],
}

/// Explicit feature object as posted to `/predict`, keyed by layout names
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFields {
    #[serde(rename = "Hour")]
    pub hour: f64,
    #[serde(rename = "Day of Week")]
    pub day_of_week: f64,
    #[serde(rename = "Is Weekend")]
    pub is_weekend: f64,
    #[serde(rename = "Recent Activity")]
    pub recent_activity: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

impl FeatureVector {
    /// Create from individual columns after range validation
    pub fn from_parts(
        hour: u8,
        day_of_week: u8,
        is_weekend: bool,
        recent_activity: f32,
        temperature: f32,
    ) -> Result<Self, FeatureError> {
        if hour > 23 {
            return Err(FeatureError::InvalidInput(format!(
                "Hour must be in 0..=23, got {}", hour
            )));
        }
        if day_of_week > 6 {
            return Err(FeatureError::InvalidInput(format!(
                "Day of Week must be in 0..=6, got {}", day_of_week
            )));
        }
        check_finite(RECENT_ACTIVITY, recent_activity as f64)?;
        check_finite(TEMPERATURE, temperature as f64)?;

        let mut values = [0.0f32; FEATURE_COUNT];
        values[HOUR] = hour as f32;
        values[DAY_OF_WEEK] = day_of_week as f32;
        values[IS_WEEKEND] = if is_weekend { 1.0 } else { 0.0 };
        values[RECENT_ACTIVITY] = recent_activity;
        values[TEMPERATURE] = temperature;

        Ok(Self { values })
    }

    /// Create from the explicit JSON feature object
    pub fn from_fields(fields: &FeatureFields) -> Result<Self, FeatureError> {
        let hour = integral(HOUR, fields.hour, 23)?;
        let day_of_week = integral(DAY_OF_WEEK, fields.day_of_week, 6)?;
        let is_weekend = integral(IS_WEEKEND, fields.is_weekend, 1)?;

        Self::from_parts(
            hour,
            day_of_week,
            is_weekend == 1,
            fields.recent_activity as f32,
            fields.temperature as f32,
        )
    }

    /// Create from a raw slice, rejecting wrong arity
    pub fn from_slice(values: &[f32]) -> Result<Self, FeatureError> {
        if values.len() != FEATURE_COUNT {
            return Err(FeatureError::InvalidInput(format!(
                "expected {} features, got {}", FEATURE_COUNT, values.len()
            )));
        }
        let fields = FeatureFields {
            hour: values[HOUR] as f64,
            day_of_week: values[DAY_OF_WEEK] as f64,
            is_weekend: values[IS_WEEKEND] as f64,
            recent_activity: values[RECENT_ACTIVITY] as f64,
            temperature: values[TEMPERATURE] as f64,
        };
        Self::from_fields(&fields)
    }

    /// Get values as array reference, in layout order
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    pub fn hour(&self) -> u8 {
        self.values[HOUR] as u8
    }

    pub fn day_of_week(&self) -> u8 {
        self.values[DAY_OF_WEEK] as u8
    }

    pub fn is_weekend(&self) -> bool {
        self.values[IS_WEEKEND] == 1.0
    }

    /// Whether the weekend flag agrees with the day-of-week column
    pub fn weekend_consistent(&self) -> bool {
        WEEKEND_DAYS.contains(&self.day_of_week()) == self.is_weekend()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: serde_json::Map<String, serde_json::Value> = FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
            .collect();
        serde_json::Value::Object(named)
    }
}

fn check_finite(index: usize, value: f64) -> Result<(), FeatureError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FeatureError::InvalidInput(format!(
            "{} must be a finite number", feature_name(index)
        )))
    }
}

fn integral(index: usize, value: f64, max: u8) -> Result<u8, FeatureError> {
    check_finite(index, value)?;
    if value.fract() != 0.0 || value < 0.0 || value > max as f64 {
        return Err(FeatureError::InvalidInput(format!(
            "{} must be an integer in 0..={}, got {}", feature_name(index), max, value
        )));
    }
    Ok(value as u8)
}
