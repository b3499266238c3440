//! Prediction Service
//!
//! Wraps an optional classifier loaded once at startup. A missing model keeps the
//! server up; predictions then fail with `ModelUnavailable`.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::features::{FeatureVector, FEATURE_LAYOUT};
use super::inference::{Classifier, OnnxClassifier};
use super::PredictionError;

/// Predicted door state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionLabel {
    Open,
    Closed,
}

impl PredictionLabel {
    /// `1 → Open`, anything else `Closed`
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            PredictionLabel::Open
        } else {
            PredictionLabel::Closed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionLabel::Open => "Open",
            PredictionLabel::Closed => "Closed",
        }
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model status for `/model-status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub model: String,
    pub feature_layout: Vec<String>,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

pub struct PredictionService {
    classifier: Option<Arc<dyn Classifier>>,
    inference_count: AtomicU64,
    latency_sum_us: AtomicU64,
}

impl PredictionService {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier: Some(classifier),
            inference_count: AtomicU64::new(0),
            latency_sum_us: AtomicU64::new(0),
        }
    }

    /// Service without a model; every prediction fails with `ModelUnavailable`
    pub fn unavailable() -> Self {
        Self {
            classifier: None,
            inference_count: AtomicU64::new(0),
            latency_sum_us: AtomicU64::new(0),
        }
    }

    /// Load the ONNX model at `path`, degrading to an unavailable service on failure
    pub fn load(path: &Path) -> Self {
        match OnnxClassifier::load(path) {
            Ok(classifier) => Self::new(Arc::new(classifier)),
            Err(e) => {
                tracing::warn!("Prediction model not loaded, /predict will be unavailable: {}", e);
                Self::unavailable()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    /// Predict the door state for one feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionLabel, PredictionError> {
        let classifier = self.classifier.as_ref()
            .ok_or(PredictionError::ModelUnavailable)?;

        let start = Instant::now();
        let class = classifier.classify(features.as_array())?;
        let elapsed = start.elapsed().as_micros() as u64;

        self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        let label = PredictionLabel::from_class(class);
        tracing::debug!(
            features = %features.to_log_entry(),
            class,
            label = %label,
            latency_us = elapsed,
            "prediction"
        );

        Ok(label)
    }

    /// Predict from raw values in layout order, rejecting wrong arity or ranges
    pub fn predict_values(&self, values: &[f32]) -> Result<PredictionLabel, PredictionError> {
        let features = FeatureVector::from_slice(values)
            .map_err(|e| PredictionError::InvalidInput(e.to_string()))?;
        self.predict(&features)
    }

    pub fn status(&self) -> ModelStatus {
        let count = self.inference_count.load(Ordering::Relaxed);
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        ModelStatus {
            loaded: self.is_loaded(),
            model: self.classifier.as_ref()
                .map(|c| c.describe())
                .unwrap_or_else(|| "None".to_string()),
            feature_layout: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
            inference_count: count,
            avg_latency_ms: avg,
        }
    }
}
