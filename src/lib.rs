//! Door Status Server
//!
//! Receives door sensor readings, shows the current room status and predicts
//! whether the door is open at a given time.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     DOOR STATUS                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────┐   ┌────────────────┐  │
//! │  │  Handlers  │──▶│   Features   │──▶│  Prediction    │  │
//! │  │  (Axum)    │   │   Builder    │   │  Service (ONNX)│  │
//! │  └─────┬──────┘   └──────────────┘   └────────────────┘  │
//! │        ▼                                                 │
//! │  ┌────────────┐                                          │
//! │  │  Status    │  one JSON record, temp-file + rename     │
//! │  │  Store     │                                          │
//! │  └────────────┘                                          │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod models;
pub mod store;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};
use model::PredictionService;
use store::StatusStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StatusStore>,
    pub predictor: Arc<PredictionService>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, store: StatusStore, predictor: PredictionService) -> Self {
        Self {
            store: Arc::new(store),
            predictor: Arc::new(predictor),
            config,
        }
    }

    /// Build state from configuration, loading the model once
    pub fn from_config(config: Config) -> Self {
        let store = StatusStore::new(config.status_file.clone());
        let predictor = PredictionService::load(&config.model_path);
        Self::new(config, store, predictor)
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/health", get(handlers::health::check))
        // Sensor ingestion
        .route("/live-data", post(handlers::live_data::ingest).get(handlers::live_data::latest))
        .route("/current-status", get(handlers::status::current))
        // Prediction
        .route("/predict", post(handlers::predict::predict))
        .route("/model-status", get(handlers::predict::model_status))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
