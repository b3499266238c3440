//! Prediction handlers
//!
//! `POST /predict` accepts either a JSON body or the HTML form. Both shapes
//! end up as one `FeatureVector` passed to the prediction service.

use axum::{
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, HeaderValue},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{AppState, AppError, AppResult};
use crate::config::Config;
use crate::features::{self, FeatureFields, FeatureVector};
use crate::model::ModelStatus;
use crate::models::{PredictResponse, TimestampRequest};
use super::pages;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTML form fields; sensor values may be left blank
#[derive(Debug, Deserialize)]
pub struct PredictForm {
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub recent_activity: Option<String>,
    #[serde(default)]
    pub temperature: Option<String>,
}

pub async fn predict(State(state): State<AppState>, mut request: Request) -> AppResult<Response> {
    if is_form(&request) {
        // Media types are case-insensitive; the Form extractor only accepts the lowercase spelling
        request.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        let Form(form) = Form::<PredictForm>::from_request(request, &state)
            .await
            .map_err(|e| AppError::ParseError(e.body_text()))?;

        let features = form_features(&form, &state.config)?;
        let label = state.predictor.predict(&features)?;
        return Ok(Html(pages::prediction_page(label)).into_response());
    }

    let Json(body) = Json::<Value>::from_request(request, &state)
        .await
        .map_err(|e| AppError::ParseError(e.body_text()))?;

    let features = json_features(body, &state.config)?;
    let label = state.predictor.predict(&features)?;
    Ok(Json(PredictResponse { prediction: label }).into_response())
}

pub async fn model_status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(state.predictor.status())
}

fn is_form(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

/// Explicit feature object, or `{date, time}` with optional sensor values
pub fn json_features(body: Value, config: &Config) -> AppResult<FeatureVector> {
    if !body.is_object() {
        return Err(AppError::ParseError("request body must be a JSON object".to_string()));
    }

    if body.get("date").is_some() || body.get("time").is_some() {
        let req: TimestampRequest = serde_json::from_value(body)
            .map_err(|e| AppError::ParseError(e.to_string()))?;
        let features = features::build(
            &req.date,
            &req.time,
            req.recent_activity.unwrap_or(config.default_recent_activity),
            req.temperature.unwrap_or(config.default_temperature),
        )?;
        return Ok(features);
    }

    let fields: FeatureFields = serde_json::from_value(body)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    Ok(FeatureVector::from_fields(&fields)?)
}

pub fn form_features(form: &PredictForm, config: &Config) -> AppResult<FeatureVector> {
    let recent_activity = optional_number("recent_activity", form.recent_activity.as_deref())?
        .unwrap_or(config.default_recent_activity);
    let temperature = optional_number("temperature", form.temperature.as_deref())?
        .unwrap_or(config.default_temperature);

    Ok(features::build(&form.date, &form.time, recent_activity, temperature)?)
}

fn optional_number(field: &str, raw: Option<&str>) -> AppResult<Option<f32>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<f32>()
            .map(Some)
            .map_err(|_| AppError::ParseError(format!("{} must be a number, got '{}'", field, s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_feature_object() {
        let body = json!({
            "Hour": 14, "Day of Week": 2, "Is Weekend": 0,
            "Recent Activity": 5, "Temperature": 22.5
        });
        let v = json_features(body, &Config::default()).unwrap();
        assert_eq!(v.as_array(), &[14.0, 2.0, 0.0, 5.0, 22.5]);
    }

    #[test]
    fn test_json_missing_feature_is_invalid_input() {
        let body = json!({"Hour": 14, "Day of Week": 2});
        let err = json_features(body, &Config::default()).unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn test_json_date_time_uses_defaults() {
        let body = json!({"date": "2024-03-16", "time": "09:45"});
        let v = json_features(body, &Config::default()).unwrap();
        assert_eq!(v.as_array(), &[9.0, 5.0, 1.0, 5.0, 22.5]);
    }

    #[test]
    fn test_json_bad_date_is_parse_error() {
        let body = json!({"date": "yesterday", "time": "09:45"});
        let err = json_features(body, &Config::default()).unwrap_err();
        assert_eq!(err.kind(), "parse_error");
    }

    #[test]
    fn test_json_non_object_rejected() {
        let err = json_features(json!([14, 2, 0, 5, 22.5]), &Config::default()).unwrap_err();
        assert_eq!(err.kind(), "parse_error");
    }

    #[test]
    fn test_form_blank_values_fall_back() {
        let form = PredictForm {
            date: "2024-03-13".to_string(),
            time: "14:30".to_string(),
            recent_activity: Some("".to_string()),
            temperature: Some(" 18.5 ".to_string()),
        };
        let v = form_features(&form, &Config::default()).unwrap();
        assert_eq!(v.as_array(), &[14.0, 2.0, 0.0, 5.0, 18.5]);
    }

    #[test]
    fn test_form_bad_number() {
        let form = PredictForm {
            date: "2024-03-13".to_string(),
            time: "14:30".to_string(),
            recent_activity: Some("lots".to_string()),
            temperature: None,
        };
        assert_eq!(form_features(&form, &Config::default()).unwrap_err().kind(), "parse_error");
    }
}
