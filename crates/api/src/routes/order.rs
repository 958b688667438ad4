use axum::extract::State;
use axum::{routing::get, Router};
use harmony_core::envelope::Outcome;
use serde_json::{json, Value};

use crate::middleware::advice::controller;
use crate::response::{Enveloped, Reply};
use crate::state::AppState;

/// GET /order/book -- returns the book title.
async fn book() -> Reply<&'static str> {
    Reply("book")
}

/// GET /order/receipt -- already enveloped, so the interceptor leaves it alone.
async fn receipt(State(state): State<AppState>) -> Enveloped<Value> {
    Enveloped(state.advice.wrap(Outcome::Success(json!({
        "item": "book",
        "quantity": 1,
    }))))
}

/// Mount order routes.
pub fn router() -> Router<AppState> {
    controller(
        Router::new()
            .route("/order/book", get(book))
            .route("/order/receipt", get(receipt)),
        module_path!(),
    )
}
