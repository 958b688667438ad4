//! Envelope interceptor.
//!
//! Controllers are grouped per module with [`controller`], which tags every
//! response with the module path as its declaring type. [`intercept`] sits
//! outside the controllers, turns those tags into a [`CandidateHandler`], and
//! asks the [`Advice`] whether to wrap the raw value. Translated errors are
//! always wrapped as failures. [`PanicEnvelope`] does the same for panics,
//! which unwind past `intercept`.

use std::any::Any;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::middleware::{map_response, Next};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use harmony_core::envelope::Outcome;
use harmony_core::intercept::{CandidateHandler, ReturnKind};
use serde::Serialize;
use tower_http::catch_panic::ResponseForPanic;

use crate::error::AppError;
use crate::response::{ApiEnvelope, ApiOutcome, RawValue, TranslatedError};
use crate::state::{Advice, AppState};

/// Declaring type of the controller that produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaringType(pub &'static str);

/// Tag every response of `router`'s routes with `declaring_type`.
///
/// ```ignore
/// controller(Router::new().route("/order/book", get(book)), module_path!())
/// ```
pub fn controller<S>(router: Router<S>, declaring_type: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(map_response(move |mut response: Response| async move {
        response
            .extensions_mut()
            .insert(DeclaringType(declaring_type));
        response
    }))
}

/// Wrap the raw value of an approved response into the success envelope, and
/// every translated error into a failure envelope.
///
/// Only the body changes: status, headers and extensions of the handler's
/// response are kept (failures are sent with `200 OK`). Responses without a
/// declaring type (fallbacks) pass through untouched.
pub async fn intercept(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    if let Some(TranslatedError(outcome)) = response.extensions_mut().remove::<TranslatedError>() {
        let mut response = replace_body(response, state.advice.wrap(outcome));
        *response.status_mut() = StatusCode::OK;
        return response;
    }

    let extensions = response.extensions();
    let (declaring_type, return_kind) = match (
        extensions.get::<DeclaringType>().copied(),
        extensions.get::<ReturnKind>().copied(),
    ) {
        (Some(DeclaringType(declaring_type)), Some(return_kind)) => (declaring_type, return_kind),
        (Some(DeclaringType(declaring_type)), None) => {
            tracing::warn!(
                declaring_type,
                "Controller response has no return kind; return `Reply` or `Enveloped` to make it eligible for wrapping"
            );
            return response;
        }
        (None, _) => return response,
    };

    let candidate = match CandidateHandler::new(declaring_type, return_kind) {
        Ok(candidate) => candidate,
        Err(err) => {
            tracing::warn!(error = %err, "Skipping envelope interception");
            return response;
        }
    };

    if !state.advice.supports(&candidate) {
        tracing::debug!(declaring_type, ?return_kind, "Response passed through unwrapped");
        return response;
    }

    let Some(RawValue(value)) = response.extensions_mut().remove::<RawValue>() else {
        return response;
    };

    tracing::debug!(declaring_type, "Wrapping response in success envelope");
    replace_body(response, state.advice.wrap(Outcome::Success(value)))
}

/// Swap the body of `response` for `envelope` rendered as JSON.
fn replace_body<D: Serialize>(response: Response, envelope: ApiEnvelope<D>) -> Response {
    let (mut parts, _) = response.into_parts();
    let (rendered, body) = Json(envelope).into_response().into_parts();
    if !rendered.status.is_success() {
        // Serialization failed; axum already rendered a 500.
        return Response::from_parts(rendered, body);
    }

    parts.headers.remove(CONTENT_LENGTH);
    if let Some(content_type) = rendered.headers.get(CONTENT_TYPE) {
        parts.headers.insert(CONTENT_TYPE, content_type.clone());
    }
    parts.extensions.insert(ReturnKind::Envelope);
    Response::from_parts(parts, body)
}

/// Renders a panicking handler as a failure envelope.
#[derive(Clone)]
pub struct PanicEnvelope {
    advice: Advice,
}

impl PanicEnvelope {
    pub fn new(advice: Advice) -> Self {
        Self { advice }
    }

    fn outcome(err: &(dyn Any + Send)) -> ApiOutcome {
        let detail = err
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| err.downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic payload");

        AppError::InternalError(format!("Handler panicked: {detail}")).into_outcome()
    }
}

impl ResponseForPanic for PanicEnvelope {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let outcome = Self::outcome(err.as_ref());
        replace_body(Response::new(Body::empty()), self.advice.wrap(outcome))
    }
}
