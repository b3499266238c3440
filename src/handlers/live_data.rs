//! Sensor ingestion handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{AppState, AppError, AppResult};
use crate::models::{IngestResponse, StatusRecord};

/// Store the status record posted by the door sensor
pub async fn ingest(
    State(state): State<AppState>,
    payload: Result<Json<StatusRecord>, JsonRejection>,
) -> AppResult<(StatusCode, Json<IngestResponse>)> {
    let Json(record) = payload.map_err(|e| AppError::ParseError(e.body_text()))?;
    record.validate()?;

    state.store.write(&record).await?;

    tracing::info!(
        "Status received: room={} people={} door={}",
        record.room,
        record.people_count,
        record.door().as_str()
    );

    Ok((StatusCode::CREATED, Json(IngestResponse::received())))
}

/// Return the last stored status record
pub async fn latest(State(state): State<AppState>) -> AppResult<Json<StatusRecord>> {
    let record = state.store.read().await?;
    Ok(Json(record))
}
