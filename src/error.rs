//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::features::FeatureError;
use crate::model::PredictionError;
use crate::store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    ParseError(String),
    InvalidInput(String),

    // Model errors
    ModelUnavailable,

    // Status errors
    NotFound(String),
    CorruptState(String),
    IoError(String),

    // Generic errors
    InternalError(String),
}

impl AppError {
    /// Machine readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ParseError(_) => "parse_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::ModelUnavailable => "model_unavailable",
            AppError::NotFound(_) => "no_data",
            AppError::CorruptState(_) => "corrupt_state",
            AppError::IoError(_) => "io_error",
            AppError::InternalError(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ParseError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CorruptState(_)
            | AppError::IoError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match &self {
            AppError::ParseError(msg) => msg.as_str(),
            AppError::InvalidInput(msg) => msg.as_str(),
            AppError::ModelUnavailable => "Model not loaded",
            AppError::NotFound(msg) => msg.as_str(),
            AppError::CorruptState(msg) => {
                tracing::error!("Corrupt status state: {}", msg);
                "Stored status data is corrupt"
            }
            AppError::IoError(msg) => {
                tracing::error!("Storage I/O error: {}", msg);
                "Status storage error"
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error"
            }
        };

        let body = Json(json!({
            "error": error_message,
            "kind": self.kind(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<FeatureError> for AppError {
    fn from(err: FeatureError) -> Self {
        match err {
            FeatureError::Parse(msg) => AppError::ParseError(msg),
            FeatureError::InvalidInput(msg) => AppError::InvalidInput(msg),
        }
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::ModelUnavailable => AppError::ModelUnavailable,
            PredictionError::InvalidInput(msg) => AppError::InvalidInput(msg),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound("No status data available yet".to_string()),
            StoreError::Corrupt(msg) => AppError::CorruptState(msg),
            StoreError::Io(e) => AppError::IoError(e.to_string()),
            StoreError::Serialization(e) => AppError::InternalError(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
