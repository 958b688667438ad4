//! Uniform `{ success, code, message, data }` result envelope.
//!
//! An [`Outcome`] is what a handler produced: either data or a classified
//! failure. [`SuccessDefaults::wrap`] flattens it into an [`Envelope`], which
//! is the only shape that ever reaches the serializer.

use serde::{Deserialize, Serialize};

/// Result envelope rendered as the response body of intercepted handlers.
///
/// Immutable once built. `data` is `None` for failures and serializes as
/// `null`:
///
/// ```json
/// {"success":false,"code":"500","message":"access denied.","data":null}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<C, M, D> {
    success: bool,
    code: C,
    message: M,
    data: Option<D>,
}

impl<C, M, D> Envelope<C, M, D> {
    /// Build a failure envelope directly from a classified failure.
    pub fn failure(code: C, message: M) -> Self {
        Self {
            success: false,
            code,
            message,
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn code(&self) -> &C {
        &self.code
    }

    pub fn message(&self) -> &M {
        &self.message
    }

    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<D> {
        self.data
    }
}

/// Classified result of handling a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<C, M, D> {
    Success(D),
    Failure { code: C, message: M },
}

/// Code and message stamped on every successful envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessDefaults<C, M> {
    pub code: C,
    pub message: M,
}

impl<C: Clone, M: Clone> SuccessDefaults<C, M> {
    pub fn new(code: C, message: M) -> Self {
        Self { code, message }
    }

    /// Flatten an outcome into an envelope.
    ///
    /// - `Success(data)` keeps `data` as-is and takes code/message from `self`.
    /// - `Failure { code, message }` copies both and leaves `data` empty.
    pub fn wrap<D>(&self, outcome: Outcome<C, M, D>) -> Envelope<C, M, D> {
        match outcome {
            Outcome::Success(data) => Envelope {
                success: true,
                code: self.code.clone(),
                message: self.message.clone(),
                data: Some(data),
            },
            Outcome::Failure { code, message } => Envelope::failure(code, message),
        }
    }
}
