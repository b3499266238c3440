//! Model Module - door state classifier
//!
//! Inference (ONNX session, classifier trait) is kept apart from the service
//! that handlers talk to, so the model can be swapped without touching HTTP code.

pub mod inference;
pub mod service;


pub use inference::{Classifier, OnnxClassifier};
pub use service::{ModelStatus, PredictionLabel, PredictionService};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("Invalid feature vector: {0}")]
    InvalidInput(String),

    #[error("Model load failed: {0}")]
    Load(String),

    #[error("Inference error: {0}")]
    Inference(String),
}
