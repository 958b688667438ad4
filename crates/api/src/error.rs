use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use harmony_core::envelope::Outcome;
use harmony_core::error::CoreError;

use crate::response::TranslatedError;

/// Failure code carried by every translated error.
pub const FAILURE_CODE: &str = "500";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] by classifying the error into a failure
/// [`Outcome`]; [`crate::middleware::advice::intercept`] wraps it into the
/// `{ success, code, message, data }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `harmony_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Classify the error into a failure outcome.
    ///
    /// Internal errors are logged and their message replaced, so no detail
    /// leaks to the caller.
    pub fn into_outcome<D>(self) -> Outcome<String, String, D> {
        let message = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => format!("{entity} with id {id} not found"),
                CoreError::Validation(msg)
                | CoreError::Unauthorized(msg)
                | CoreError::Forbidden(msg) => msg,
                CoreError::InvalidArgument(msg) | CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    sanitized()
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => msg,
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                sanitized()
            }
        };

        Outcome::Failure {
            code: FAILURE_CODE.to_string(),
            message,
        }
    }
}

fn sanitized() -> String {
    "An internal error occurred".to_string()
}

/// The classified outcome travels in the response extensions. The body stays
/// empty until the interceptor renders it; a bare `500` means the handler was
/// mounted outside [`crate::middleware::advice::controller`] routes.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response
            .extensions_mut()
            .insert(TranslatedError(self.into_outcome()));
        response
    }
}
