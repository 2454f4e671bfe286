//! HTTP-level integration tests for the `/speed-intervals` endpoints.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{body_json, get, post_json_auth, put_json, put_json_auth, TestApp};
use serde_json::json;
use traffic_core::thresholds::{DEFAULT_LOW_SPEED, DEFAULT_MEDIUM_SPEED};
use traffic_db::SpeedIntervalStore;

const INTERVALS: &str = "/api/v1/speed-intervals";

#[tokio::test]
async fn current_thresholds_default_to_20_and_50() {
    let app = TestApp::new();

    let response = get(app.router(), INTERVALS).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["low_speed"], DEFAULT_LOW_SPEED);
    assert_eq!(json["data"]["medium_speed"], DEFAULT_MEDIUM_SPEED);
    assert!(json["data"]["updated_at"].is_null());
}

#[tokio::test]
async fn admin_can_update_thresholds() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = put_json_auth(
        app.router(),
        INTERVALS,
        &token,
        json!({ "low_speed": 30, "medium_speed": 60 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["low_speed"], 30.0);
    assert_eq!(json["data"]["medium_speed"], 60.0);
    assert!(json["data"]["updated_at"].is_string());

    let current = app.thresholds.current().await;
    assert_eq!(current.low_speed(), 30.0);
    assert_eq!(current.medium_speed(), 60.0);

    let stored = app.store.latest().await.unwrap();
    assert_matches!(stored, Some(row) if row.low_speed == 30.0 && row.medium_speed == 60.0);
}

#[tokio::test]
async fn inverted_thresholds_are_rejected_and_current_kept() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = put_json_auth(
        app.router(),
        INTERVALS,
        &token,
        json!({ "low_speed": 60, "medium_speed": 50 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let current = app.thresholds.current().await;
    assert_eq!(current.low_speed(), DEFAULT_LOW_SPEED);
    assert_eq!(current.medium_speed(), DEFAULT_MEDIUM_SPEED);
    assert_matches!(app.store.latest().await, Ok(None));
}

#[tokio::test]
async fn equal_thresholds_are_rejected() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = put_json_auth(
        app.router(),
        INTERVALS,
        &token,
        json!({ "low_speed": 40, "medium_speed": 40 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn negative_threshold_is_rejected() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = put_json_auth(
        app.router(),
        INTERVALS,
        &token,
        json!({ "low_speed": -1, "medium_speed": 40 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_threshold_is_a_validation_error() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = put_json_auth(
        app.router(),
        INTERVALS,
        &token,
        json!({ "low_speed": "slow", "medium_speed": 50 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(app.thresholds.current().await.low_speed(), DEFAULT_LOW_SPEED);
}

#[tokio::test]
async fn anonymous_cannot_update_thresholds() {
    let app = TestApp::new();

    let response = put_json(
        app.router(),
        INTERVALS,
        json!({ "low_speed": 30, "medium_speed": 60 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn viewer_cannot_update_thresholds() {
    let app = TestApp::new();
    let token = app.viewer_token();

    let response = put_json_auth(
        app.router(),
        INTERVALS,
        &token,
        json!({ "low_speed": 30, "medium_speed": 60 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.thresholds.current().await.low_speed(), DEFAULT_LOW_SPEED);
}

#[tokio::test]
async fn post_is_not_an_update_route() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = post_json_auth(
        app.router(),
        INTERVALS,
        &token,
        json!({ "low_speed": 30, "medium_speed": 60 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn history_lists_most_recent_first() {
    let app = TestApp::new();
    let token = app.admin_token();

    for (low, medium) in [(10, 30), (25, 55), (30, 70)] {
        let response = put_json_auth(
            app.router(),
            INTERVALS,
            &token,
            json!({ "low_speed": low, "medium_speed": medium }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let json = body_json(get(app.router(), &format!("{INTERVALS}/history")).await).await;
    let lows: Vec<f64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["low_speed"].as_f64().unwrap())
        .collect();

    assert_eq!(lows, vec![30.0, 25.0, 10.0]);

    let current = app.thresholds.current().await;
    assert_eq!(current.low_speed(), 30.0);
    assert_eq!(current.medium_speed(), 70.0);
}

#[tokio::test]
async fn history_entry_is_retrievable_by_id() {
    let app = TestApp::new();
    let token = app.admin_token();
    put_json_auth(
        app.router(),
        INTERVALS,
        &token,
        json!({ "low_speed": 12, "medium_speed": 34 }),
    )
    .await;
    let id = app.store.latest().await.unwrap().unwrap().id;

    let response = get(app.router(), &format!("{INTERVALS}/history/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["low_speed"], 12.0);
    assert_eq!(json["data"]["medium_speed"], 34.0);
}

#[tokio::test]
async fn missing_history_entry_returns_404() {
    let app = TestApp::new();

    let response = get(app.router(), &format!("{INTERVALS}/history/77")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_history_paging_uses_error_envelope() {
    let app = TestApp::new();

    let response = get(app.router(), &format!("{INTERVALS}/history?offset=x")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn classification_follows_threshold_update() {
    let app = TestApp::new();
    app.seed_reading(Some(35.0)).await;
    let token = app.admin_token();

    let json = body_json(get(app.router(), "/api/v1/speed-readings").await).await;
    assert_eq!(json["data"][0]["intensity"], "média");

    let response = put_json_auth(
        app.router(),
        INTERVALS,
        &token,
        json!({ "low_speed": 40, "medium_speed": 80 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app.router(), "/api/v1/speed-readings").await).await;
    assert_eq!(json["data"][0]["intensity"], "elevada");

    let json =
        body_json(get(app.router(), "/api/v1/speed-readings?intensity=m%C3%A9dia").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_never_expose_an_inverted_pair() {
    let app = Arc::new(TestApp::new());
    let token = app.admin_token();

    let mut readers = Vec::new();
    for _ in 0..4 {
        let app = Arc::clone(&app);
        readers.push(tokio::spawn(async move {
            for _ in 0..50 {
                let json = body_json(get(app.router(), INTERVALS).await).await;
                let low = json["data"]["low_speed"].as_f64().unwrap();
                let medium = json["data"]["medium_speed"].as_f64().unwrap();
                assert!(low < medium, "observed inverted pair ({low}, {medium})");
            }
        }));
    }

    let mut writers = Vec::new();
    for pair in [(10, 20), (30, 40)] {
        let app = Arc::clone(&app);
        let token = token.clone();
        writers.push(tokio::spawn(async move {
            for _ in 0..25 {
                let response = put_json_auth(
                    app.router(),
                    INTERVALS,
                    &token,
                    json!({ "low_speed": pair.0, "medium_speed": pair.1 }),
                )
                .await;
                assert_eq!(response.status(), StatusCode::OK);
            }
        }));
    }

    for task in writers.into_iter().chain(readers) {
        task.await.unwrap();
    }

    // The pair in effect is the most recently stamped history row.
    let latest = app.store.latest().await.unwrap().unwrap();
    let current = app.thresholds.current().await;
    assert_eq!(current.updated_at(), Some(latest.updated_at));
    assert!(current.low_speed() < current.medium_speed());
}
