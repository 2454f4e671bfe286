#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use traffic_api::auth::jwt::{issue_token, JwtConfig};
use traffic_api::config::ServerConfig;
use traffic_api::routes;
use traffic_api::state::AppState;
use traffic_core::roles::{ROLE_ADMIN, ROLE_VIEWER};
use traffic_core::thresholds::ThresholdStore;
use traffic_db::models::speed_reading::{CreateSpeedReading, NewSpeedReading, SpeedReading};
use traffic_db::{MemoryStore, SpeedReadingStore};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            token_ttl_mins: 15,
        },
    }
}

/// A test application sharing its store with the test body, so fixtures
/// can be seeded directly and results inspected after requests.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub thresholds: Arc<ThresholdStore>,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            thresholds: Arc::new(ThresholdStore::default()),
            config: test_config(),
        }
    }

    /// Build the full application router with all middleware layers.
    ///
    /// Mirrors the router construction in `main.rs` so integration tests
    /// exercise the same middleware stack production uses.
    pub fn router(&self) -> Router {
        let state = AppState {
            readings: self.store.clone(),
            intervals: self.store.clone(),
            thresholds: Arc::clone(&self.thresholds),
            config: Arc::new(self.config.clone()),
        };

        let cors = CorsLayer::new()
            .allow_origin(["http://localhost:5173".parse().unwrap()])
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::PATCH,
            ])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true)
            .max_age(Duration::from_secs(3600));

        let request_id_header = HeaderName::from_static("x-request-id");

        Router::new()
            .merge(routes::health::router())
            .nest("/api/v1", routes::api_routes())
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
            .layer(cors)
            .with_state(state)
    }

    pub fn admin_token(&self) -> String {
        issue_token(1, ROLE_ADMIN, &self.config.jwt).unwrap()
    }

    pub fn viewer_token(&self) -> String {
        issue_token(2, ROLE_VIEWER, &self.config.jwt).unwrap()
    }

    /// Insert a reading directly into the store.
    pub async fn seed_reading(&self, speed: Option<f64>) -> SpeedReading {
        let input = CreateSpeedReading {
            long_start: Some(103.9460064),
            lat_start: Some(30.75066046),
            long_end: Some(103.9564943),
            lat_end: Some(30.7450801),
            length: Some(1179.207157),
            speed,
        };
        self.store
            .create(&NewSpeedReading::from(&input))
            .await
            .unwrap()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PUT, uri, None, body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
