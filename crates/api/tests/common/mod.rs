#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use learnpath_api::auth::jwt::JwtConfig;
use learnpath_api::config::ServerConfig;
use learnpath_api::router::build_app_router;
use learnpath_api::state::AppState;
use learnpath_core::recommendation::HeuristicThresholds;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-bytes".to_string(),
            expiry_hours: 24,
        },
        recommendation: HeuristicThresholds::default(),
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should be handled")
}

fn json_request(
    method: Method,
    uri: &str,
    body: &serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a learner through the API and return their id.
pub async fn register(app: Router, name: &str, email: &str) -> i64 {
    let response = post_json(
        app,
        "/api/auth/register",
        serde_json::json!({ "name": name, "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Log in and return the bearer token.
pub async fn login(app: Router, email: &str) -> String {
    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register and log in a learner, returning `(user_id, token)`.
pub async fn signed_in(pool: &PgPool, name: &str, email: &str) -> (i64, String) {
    let user_id = register(build_test_app(pool.clone()), name, email).await;
    let token = login(build_test_app(pool.clone()), email).await;
    (user_id, token)
}

/// Seed the starter topics and questions through the API.
pub async fn seed_catalog(pool: &PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/topics/seed",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/quiz/seed-questions",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}
