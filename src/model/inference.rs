//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the exported door state classifier and runs it on one feature row.
//! The model is opaque: only the class it outputs is used.

use std::path::Path;

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Tensor;

use crate::features::FEATURE_COUNT;
use super::PredictionError;

/// Probability/score outputs at or above this count as class 1
pub const SCORE_THRESHOLD: f32 = 0.5;

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Binary classifier over one feature row (ONNX, test doubles, ...)
pub trait Classifier: Send + Sync {
    /// Return the predicted class for a row in `FEATURE_LAYOUT` order
    fn classify(&self, features: &[f32; FEATURE_COUNT]) -> Result<i64, PredictionError>;

    /// Human readable model description for status output
    fn describe(&self) -> String;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// Classifier backed by an ONNX Runtime session
pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_name: String,
    model_path: String,
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn load(model_path: &Path) -> Result<Self, PredictionError> {
        tracing::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(PredictionError::Load(format!(
                "Model not found: {}", model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| PredictionError::Load(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PredictionError::Load(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| PredictionError::Load(format!("Failed to load model: {}", e)))?;

        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| PredictionError::Load("No output defined".to_string()))?;

        tracing::info!("ONNX model loaded successfully (output: {})", output_name);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            model_path: model_path.display().to_string(),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, features: &[f32; FEATURE_COUNT]) -> Result<i64, PredictionError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| PredictionError::Inference(format!("Array error: {}", e)))?;

        let input_tensor = Tensor::from_array(input_array)
            .map_err(|e| PredictionError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| PredictionError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.output_name)
            .ok_or_else(|| PredictionError::Inference("No output".to_string()))?;

        // Tree ensembles exported with a label output yield int64 classes
        if let Ok((_, labels)) = output.try_extract_tensor::<i64>() {
            return class_from_labels(labels);
        }

        let (_, scores) = output.try_extract_tensor::<f32>()
            .map_err(|e| PredictionError::Inference(format!("Extract error: {}", e)))?;

        class_from_scores(scores)
    }

    fn describe(&self) -> String {
        format!("onnx:{}", self.model_path)
    }
}

// ============================================================================
// OUTPUT DECODING
// ============================================================================

/// Class from an int64 label output (first row)
pub fn class_from_labels(labels: &[i64]) -> Result<i64, PredictionError> {
    labels.first()
        .copied()
        .ok_or_else(|| PredictionError::Inference("Empty label output".to_string()))
}

/// Class from a score or probability output.
/// The last column is the positive class for both `[score]` and `[p0, p1]` shapes.
pub fn class_from_scores(scores: &[f32]) -> Result<i64, PredictionError> {
    let score = scores.last()
        .copied()
        .ok_or_else(|| PredictionError::Inference("Empty score output".to_string()))?;

    Ok(if score >= SCORE_THRESHOLD { 1 } else { 0 })
}
