//! Tests for `AppError` → failure outcome translation.
//!
//! Classification is checked directly on `AppError` values. Rendering goes
//! through the interceptor and is covered in `response_envelope.rs` and
//! `interceptor.rs`.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use harmony_api::error::{AppError, FAILURE_CODE};
use harmony_api::response::TranslatedError;
use harmony_core::envelope::Outcome;
use harmony_core::error::CoreError;
use http_body_util::BodyExt;

/// Helper: classify an `AppError` into its failure code and message.
fn classify(err: AppError) -> (String, String) {
    match err.into_outcome::<()>() {
        Outcome::Failure { code, message } => (code, message),
        Outcome::Success(()) => panic!("errors must classify as failures"),
    }
}

// ---------------------------------------------------------------------------
// Test: CoreError::Forbidden keeps its message
// ---------------------------------------------------------------------------

#[test]
fn forbidden_error_keeps_message() {
    let (code, message) = classify(AppError::Core(CoreError::Forbidden("access denied.".into())));

    assert_eq!(code, "500");
    assert_eq!(message, "access denied.");
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound names the entity and id
// ---------------------------------------------------------------------------

#[test]
fn not_found_error_names_entity() {
    let (code, message) = classify(AppError::Core(CoreError::NotFound {
        entity: "Book",
        id: "42".into(),
    }));

    assert_eq!(code, FAILURE_CODE);
    assert_eq!(message, "Book with id 42 not found");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest keeps its message
// ---------------------------------------------------------------------------

#[test]
fn bad_request_error_keeps_message() {
    let (_, message) = classify(AppError::BadRequest("invalid field value".into()));

    assert_eq!(message, "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: internal errors are sanitized
// ---------------------------------------------------------------------------

#[test]
fn internal_error_sanitizes_message() {
    let (code, message) = classify(AppError::InternalError(
        "secret database credentials leaked".into(),
    ));

    assert_eq!(code, FAILURE_CODE);
    assert_eq!(message, "An internal error occurred");
}

#[test]
fn core_internal_error_sanitizes_message() {
    let (_, message) = classify(AppError::Core(CoreError::Internal("stack trace here".into())));

    assert_eq!(message, "An internal error occurred");
}

#[test]
fn unauthorized_error_classifies_as_failure_outcome() {
    let outcome = AppError::Core(CoreError::Unauthorized("login first".into())).into_outcome::<()>();

    assert_matches!(
        outcome,
        Outcome::Failure { code, message } if code == "500" && message == "login first"
    );
}

// ---------------------------------------------------------------------------
// Test: the error response carries the classified outcome for the interceptor
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_response_carries_outcome_until_wrapped() {
    let response = AppError::Core(CoreError::Forbidden("access denied.".into())).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_matches!(
        response.extensions().get::<TranslatedError>(),
        Some(TranslatedError(Outcome::Failure { message, .. })) if message == "access denied."
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}
