//! Harmony API server library.
//!
//! Exposes the building blocks (config, state, error translation, envelope
//! interceptor, routes) so integration tests and the binary entrypoint share
//! the same router.

pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
