//! Current status page

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{AppState, AppResult};
use crate::models::CurrentStatus;
use crate::store::StoreError;
use super::pages;

#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub format: Option<String>,
}

impl StatusQuery {
    fn wants_json(&self) -> bool {
        self.format.as_deref().is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Render room, occupancy and door state from the latest record
pub async fn current(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Response> {
    match state.store.read().await {
        Ok(record) if query.wants_json() => Ok(Json(CurrentStatus::from(&record)).into_response()),
        Ok(record) => Ok(Html(pages::status_page(&record)).into_response()),
        Err(StoreError::NotFound) if !query.wants_json() => {
            Ok((StatusCode::NOT_FOUND, Html(pages::no_data_page())).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
