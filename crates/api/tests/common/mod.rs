#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use harmony_api::config::{HarmonySettings, ServerConfig};
use harmony_api::router::build_app_router;
use harmony_api::state::{Advice, AppState};
use harmony_core::intercept::InterceptionConfig;

/// Packages matching the order and personal controllers, but not home.
pub const CONTROLLER_PACKAGES: [&str; 2] = [
    "harmony_api::routes::order",
    "harmony_api::routes::personal",
];

/// Build a test `ServerConfig` with safe defaults and the given interception config.
pub fn test_config(interception: InterceptionConfig) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        harmony: HarmonySettings {
            interception,
            success_code: "code".to_string(),
            success_message: "operation succeeded".to_string(),
        },
    }
}

/// Interception scoped to [`CONTROLLER_PACKAGES`].
pub fn scoped_interception() -> InterceptionConfig {
    InterceptionConfig {
        enabled: true,
        packages: CONTROLLER_PACKAGES.iter().map(|p| p.to_string()).collect(),
    }
}

/// Build the application state for `config`.
pub fn test_state(config: &ServerConfig) -> AppState {
    let advice = Advice::builder()
        .defaults(config.harmony.success_defaults())
        .config(config.harmony.interception.clone())
        .build()
        .unwrap();

    AppState { advice }
}

/// Build the full application router with all middleware layers, exactly as
/// `main.rs` does.
pub fn build_test_app(interception: InterceptionConfig) -> Router {
    let config = test_config(interception);
    build_app_router(test_state(&config), &config).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
