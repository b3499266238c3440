//! Prediction request/response payloads

use serde::{Deserialize, Serialize};

use crate::model::PredictionLabel;

/// Date/time prediction request, from the HTML form or a JSON body.
/// Missing sensor values fall back to configured defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TimestampRequest {
    pub date: String,
    pub time: String,
    #[serde(default, alias = "Recent Activity")]
    pub recent_activity: Option<f32>,
    #[serde(default, alias = "Temperature")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: PredictionLabel,
}
