use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use door_status::features::FEATURE_COUNT;
use door_status::model::{Classifier, PredictionError, PredictionService};
use door_status::store::StatusStore;
use door_status::{create_router, AppState, Config};

/// Always answers with the same class
struct FixedClassifier(i64);

impl Classifier for FixedClassifier {
    fn classify(&self, _features: &[f32; FEATURE_COUNT]) -> Result<i64, PredictionError> {
        Ok(self.0)
    }

    fn describe(&self) -> String {
        format!("fixed:{}", self.0)
    }
}

fn app_with(predictor: PredictionService) -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        status_file: dir.path().join("esp_data.json"),
        ..Config::default()
    };
    let store = StatusStore::new(config.status_file.clone());
    let state = AppState::new(config, store, predictor);
    (create_router(state), dir)
}

fn app_with_class(class: i64) -> (Router, TempDir) {
    app_with(PredictionService::new(Arc::new(FixedClassifier(class))))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn live_data_then_current_status_shows_record() {
    let (app, _dir) = app_with_class(0);

    let (status, body) = send(
        &app,
        post_json("/live-data", json!({"room": "Lab1", "people_count": 3, "door_state": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "success");

    let (status, html) = send(&app, get("/current-status")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<dd id=\"room\">Lab1</dd>"));
    assert!(html.contains("<dd id=\"people_count\">3</dd>"));
    assert!(html.contains("<dd id=\"door_status\">Open</dd>"));

    let (status, body) = send(&app, get("/current-status?format=json")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"room": "Lab1", "people_count": 3, "door_status": "Open"}));
}

#[tokio::test]
async fn live_data_get_returns_last_written_record() {
    let (app, _dir) = app_with_class(0);

    send(&app, post_json("/live-data", json!({"room": "Lab1", "people_count": 3, "door_state": 1}))).await;
    send(&app, post_json("/live-data", json!({"room": "Lab2", "people_count": 0, "door_state": 0}))).await;

    let (status, body) = send(&app, get("/live-data")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"room": "Lab2", "people_count": 0, "door_state": 0}));
}

#[tokio::test]
async fn live_data_get_without_write_is_404_no_data() {
    let (app, _dir) = app_with_class(0);

    let (status, body) = send(&app, get("/live-data")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["kind"], "no_data");
    assert!(body["error"].as_str().unwrap().contains("No status data"));
    assert!(body.get("room").is_none());
}

#[tokio::test]
async fn current_status_without_write_is_404_page() {
    let (app, _dir) = app_with_class(0);

    let (status, html) = send(&app, get("/current-status")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("id=\"no_data\""));
    assert!(!html.contains("Unknown Room"));

    let (status, body) = send(&app, get("/current-status?format=json")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["kind"], "no_data");
    assert!(body.get("room").is_none());
}

#[tokio::test]
async fn corrupt_state_is_500_not_defaulted() {
    let (app, dir) = app_with_class(0);
    std::fs::write(dir.path().join("esp_data.json"), b"{\"room\":").unwrap();

    let (status, body) = send(&app, get("/live-data")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["kind"], "corrupt_state");

    let (status, _) = send(&app, get("/current-status")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn live_data_rejects_malformed_body() {
    let (app, _dir) = app_with_class(0);

    let bad_bodies = [
        Request::builder()
            .method("POST")
            .uri("/live-data")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
        post_json("/live-data", json!({"room": "Lab1", "people_count": 3})),
        post_json("/live-data", json!({"room": "Lab1", "people_count": -2, "door_state": 1})),
        post_json("/live-data", json!({"room": "Lab1", "people_count": 3, "door_state": 4})),
    ];

    for request in bad_bodies {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert!(body["error"].is_string());
    }

    // Nothing was stored
    let (status, _) = send(&app, get("/live-data")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn predict_json_features_class_zero_is_closed() {
    let (app, _dir) = app_with_class(0);

    let (status, body) = send(
        &app,
        post_json(
            "/predict",
            json!({"Hour": 14, "Day of Week": 2, "Is Weekend": 0, "Recent Activity": 5, "Temperature": 22.5}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"prediction": "Closed"}));
}

#[tokio::test]
async fn predict_json_date_time_class_one_is_open() {
    let (app, _dir) = app_with_class(1);

    let (status, body) = send(&app, post_json("/predict", json!({"date": "2024-03-13", "time": "14:30"}))).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["prediction"], "Open");
}

#[tokio::test]
async fn predict_form_renders_result_page() {
    let (app, _dir) = app_with_class(1);

    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("date=2024-03-16&time=09%3A30&recent_activity=&temperature="))
        .unwrap();
    let (status, html) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<strong id=\"prediction\">Open</strong>"));
}

#[tokio::test]
async fn predict_form_content_type_is_case_insensitive() {
    let (app, _dir) = app_with_class(0);

    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(CONTENT_TYPE, "Application/X-WWW-Form-Urlencoded; charset=UTF-8")
        .body(Body::from("date=2024-03-13&time=14%3A30"))
        .unwrap();
    let (status, html) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK, "body: {}", html);
    assert!(html.contains("<strong id=\"prediction\">Closed</strong>"));
}

#[tokio::test]
async fn predict_bad_input_is_400() {
    let (app, _dir) = app_with_class(0);

    let (status, body) = send(&app, post_json("/predict", json!({"date": "2024-13-45", "time": "14:30"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["kind"], "parse_error");

    let (status, body) = send(&app, post_json("/predict", json!({"Hour": 31, "Day of Week": 2, "Is Weekend": 0, "Recent Activity": 5, "Temperature": 22.5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["kind"], "invalid_input");
}

#[tokio::test]
async fn predict_without_model_is_unavailable() {
    let (app, _dir) = app_with(PredictionService::unavailable());

    let (status, body) = send(
        &app,
        post_json(
            "/predict",
            json!({"Hour": 14, "Day of Week": 2, "Is Weekend": 0, "Recent Activity": 5, "Temperature": 22.5}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["kind"], "model_unavailable");
    assert_eq!(body["error"], "Model not loaded");

    // The rest of the service keeps working
    let (status, _) = send(&app, post_json("/live-data", json!({"room": "Lab1", "people_count": 1, "door_state": 0}))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn model_status_and_health() {
    let (app, _dir) = app_with_class(1);

    send(&app, post_json("/predict", json!({"date": "2024-03-13", "time": "08:00"}))).await;

    let (status, body) = send(&app, get("/model-status")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["loaded"], true);
    assert_eq!(body["model"], "fixed:1");
    assert_eq!(body["inference_count"], 1);
    assert_eq!(body["feature_layout"][0], "Hour");

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
}

#[tokio::test]
async fn home_page_has_prediction_form() {
    let (app, _dir) = app_with_class(0);

    let (status, html) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("action=\"/predict\""));
    assert!(html.contains("name=\"date\""));
}
