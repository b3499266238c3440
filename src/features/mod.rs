//! Features Module - model input construction
//!
//! Keeps the column layout, the validated vector type and the
//! timestamp-to-features builder in one place.

pub mod layout;
pub mod vector;
pub mod builder;


pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::{FeatureFields, FeatureVector};
pub use builder::{build, build_at, day_index};

/// Errors raised while building a feature vector
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    /// Malformed date/time strings
    #[error("{0}")]
    Parse(String),

    /// Out-of-range or wrongly shaped feature values
    #[error("{0}")]
    InvalidInput(String),
}
