//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema the classifier was trained on.**
//!
//! The order of [`FEATURE_LAYOUT`] is the column order of the training data.
//! Reordering it silently produces wrong predictions.

/// Feature names in exact order they appear in the vector.
/// The names double as the JSON keys accepted by `POST /predict`.
pub const FEATURE_LAYOUT: &[&str] = &[
    "Hour",            // 0: hour of day, 0-23
    "Day of Week",     // 1: Monday = 0 .. Sunday = 6
    "Is Weekend",      // 2: 1 on Saturday/Sunday
    "Recent Activity", // 3: recent door activity count
    "Temperature",     // 4: room temperature in °C
];

/// Total number of features
pub const FEATURE_COUNT: usize = 5;

pub const HOUR: usize = 0;
pub const DAY_OF_WEEK: usize = 1;
pub const IS_WEEKEND: usize = 2;
pub const RECENT_ACTIVITY: usize = 3;
pub const TEMPERATURE: usize = 4;

/// Day-of-week values counted as weekend (Saturday, Sunday)
pub const WEEKEND_DAYS: [u8; 2] = [5, 6];

/// Get name of a feature by index
pub fn feature_name(index: usize) -> &'static str {
    FEATURE_LAYOUT.get(index).copied().unwrap_or("feature")
}

// Keeps FEATURE_COUNT and FEATURE_LAYOUT in lockstep at compile time.
const _: () = assert!(FEATURE_LAYOUT.len() == FEATURE_COUNT);
