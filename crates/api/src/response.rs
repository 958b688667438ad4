//! Handler return types understood by the envelope interceptor.
//!
//! - [`Reply`] carries a raw value. It renders on its own (text for strings,
//!   JSON otherwise) and also keeps the structured value in the response
//!   extensions so [`crate::middleware::advice::intercept`] can wrap it.
//! - [`Enveloped`] carries an already-built envelope and is never wrapped again.
//! - [`TranslatedError`] carries a classified failure from [`AppError`] until
//!   the interceptor wraps it.

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use harmony_core::envelope::{Envelope, Outcome};
use harmony_core::intercept::ReturnKind;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// Envelope shape produced by this API.
pub type ApiEnvelope<D = Value> = Envelope<String, String, D>;

/// Outcome shape produced by this API.
pub type ApiOutcome<D = Value> = Outcome<String, String, D>;

/// Failure outcome of a handler error, waiting to be wrapped.
#[derive(Debug, Clone)]
pub struct TranslatedError(pub ApiOutcome);

/// Structured raw value stashed in the response extensions by [`Reply`].
#[derive(Debug, Clone)]
pub struct RawValue(pub Value);

/// A plain handler return value, eligible for wrapping.
///
/// ```ignore
/// async fn book() -> Reply<&'static str> {
///     Reply("book")
/// }
/// ```
#[derive(Debug)]
pub struct Reply<T>(pub T);

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let value = match serde_json::to_value(&self.0) {
            Ok(value) => value,
            Err(err) => {
                return AppError::InternalError(format!("Failed to serialize reply: {err}"))
                    .into_response()
            }
        };

        let mut response = match &value {
            Value::String(text) => (
                [(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
                text.clone(),
            )
                .into_response(),
            other => Json(other).into_response(),
        };

        let extensions = response.extensions_mut();
        extensions.insert(ReturnKind::Raw);
        extensions.insert(RawValue(value));
        response
    }
}

/// An envelope returned as-is.
#[derive(Debug)]
pub struct Enveloped<D>(pub ApiEnvelope<D>);

impl<D: Serialize> IntoResponse for Enveloped<D> {
    fn into_response(self) -> Response {
        let mut response = Json(self.0).into_response();
        response.extensions_mut().insert(ReturnKind::Envelope);
        response
    }
}
