//! Route modules. Each controller module is one declaring type.

pub mod health;
pub mod home;
pub mod order;
pub mod personal;

use axum::Router;

use crate::state::AppState;

/// All controllers subject to envelope interception.
///
/// Health lives outside this set and is merged separately so it is never wrapped.
pub fn controllers() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .merge(order::router())
        .merge(personal::router())
}
