use axum::{routing::get, Router};

use crate::state::AppState;

/// GET /health -- liveness check, plain text.
async fn health_check() -> &'static str {
    "It's ok!"
}

/// Mount health check routes (intended for root level, outside the envelope interceptor).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
