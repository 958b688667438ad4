//! Harmony core: the uniform result envelope and the interception decision.
//!
//! Nothing in this crate knows about HTTP. The API crate feeds it a
//! [`intercept::CandidateHandler`] per response and asks the
//! [`advice::ResponseAdvice`] whether (and how) to wrap the raw value.

pub mod advice;
pub mod envelope;
pub mod error;
pub mod intercept;
