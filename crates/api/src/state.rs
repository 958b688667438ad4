use harmony_core::advice::ResponseAdvice;

/// Response advice used by the API: string codes and messages.
pub type Advice = ResponseAdvice<String, String>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Interception predicate and envelope wrapper. Clones share one config handle.
    pub advice: Advice,
}
