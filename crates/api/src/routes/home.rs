use axum::{routing::get, Router};

use crate::middleware::advice::controller;
use crate::response::Reply;
use crate::state::AppState;

/// GET /home
async fn home() -> Reply<&'static str> {
    Reply("home")
}

pub fn router() -> Router<AppState> {
    controller(Router::new().route("/home", get(home)), module_path!())
}
