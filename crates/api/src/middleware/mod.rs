//! Request pipeline middleware.
//!
//! - [`advice::intercept`] -- Wraps raw handler values into the success envelope.
//! - [`advice::controller`] -- Tags a controller's responses with its declaring type.

pub mod advice;
