use axum::{routing::get, Router};
use harmony_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::advice::controller;
use crate::response::Reply;
use crate::state::AppState;

/// GET /personal/account -- account details are never visible to callers.
async fn account() -> AppResult<Reply<String>> {
    Err(AppError::Core(CoreError::Forbidden("access denied.".into())))
}

/// Mount personal routes.
pub fn router() -> Router<AppState> {
    controller(
        Router::new().route("/personal/account", get(account)),
        module_path!(),
    )
}
