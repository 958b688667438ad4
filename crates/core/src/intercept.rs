//! Interception decision: should a handler's raw return value be wrapped?

use std::borrow::Cow;

use serde::Deserialize;

use crate::error::CoreError;

/// Which handlers get their responses wrapped.
///
/// Loaded once at startup. An empty `packages` list matches every handler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InterceptionConfig {
    pub enabled: bool,
    /// Declaring-type prefixes (Rust module paths, e.g. `my_app::controller`).
    pub packages: Vec<String>,
}

impl Default for InterceptionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            packages: Vec::new(),
        }
    }
}

/// Declared return type of a handler, as far as interception cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// Any plain value.
    Raw,
    /// Already an [`Envelope`](crate::envelope::Envelope).
    Envelope,
}

/// The handler about to produce a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateHandler {
    declaring_type: Cow<'static, str>,
    return_kind: ReturnKind,
}

impl CandidateHandler {
    pub fn new(
        declaring_type: impl Into<Cow<'static, str>>,
        return_kind: ReturnKind,
    ) -> Result<Self, CoreError> {
        let declaring_type = declaring_type.into();
        if declaring_type.is_empty() {
            return Err(CoreError::InvalidArgument(
                "Candidate handler must have a declaring type".into(),
            ));
        }
        Ok(Self {
            declaring_type,
            return_kind,
        })
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn return_kind(&self) -> ReturnKind {
        self.return_kind
    }
}

/// Decide whether `candidate`'s response should be wrapped.
///
/// True iff interception is enabled, the declaring type starts with one of the
/// configured prefixes (or none are configured), and the handler does not
/// already return an envelope.
///
/// Matching is a plain case-sensitive `starts_with`; `com::foo` also matches
/// `com::foobar::X`.
pub fn should_intercept(candidate: &CandidateHandler, config: &InterceptionConfig) -> bool {
    let declaring_type = candidate.declaring_type();
    let in_scope = config.packages.is_empty()
        || config
            .packages
            .iter()
            .any(|prefix| declaring_type.starts_with(prefix.as_str()));

    config.enabled && in_scope && candidate.return_kind() != ReturnKind::Envelope
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config(enabled: bool, packages: &[&str]) -> InterceptionConfig {
        InterceptionConfig {
            enabled,
            packages: packages.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn raw(declaring_type: &'static str) -> CandidateHandler {
        CandidateHandler::new(declaring_type, ReturnKind::Raw).unwrap()
    }

    #[test]
    fn default_config_is_enabled_and_matches_all() {
        let config = InterceptionConfig::default();
        assert!(config.enabled);
        assert!(config.packages.is_empty());
        assert!(should_intercept(&raw("anything::at::all"), &config));
    }

    #[test]
    fn disabled_never_intercepts() {
        let config = config(false, &["app::controller"]);
        assert!(!should_intercept(&raw("app::controller::order"), &config));
        assert!(!should_intercept(&raw("app::health"), &config));
    }

    #[test]
    fn matches_configured_prefix() {
        let config = config(true, &["app::controller::order", "app::controller::personal"]);
        assert!(should_intercept(&raw("app::controller::order"), &config));
        assert!(should_intercept(&raw("app::controller::personal::account"), &config));
        assert!(!should_intercept(&raw("app::controller::home"), &config));
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let config = config(true, &["app::Controller"]);
        assert!(!should_intercept(&raw("app::controller::order"), &config));
    }

    #[test]
    fn prefix_match_ignores_module_boundaries() {
        let config = config(true, &["com::foo"]);
        assert!(should_intercept(&raw("com::foobar::X"), &config));
    }

    #[test]
    fn envelope_return_is_never_wrapped_again() {
        let candidate = CandidateHandler::new("app::controller::order", ReturnKind::Envelope).unwrap();
        assert!(!should_intercept(&candidate, &config(true, &[])));
        assert!(!should_intercept(&candidate, &config(true, &["app"])));
    }

    #[test]
    fn empty_declaring_type_is_rejected() {
        let result = CandidateHandler::new("", ReturnKind::Raw);
        assert_matches!(result, Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: InterceptionConfig = serde_json::from_str(r#"{"packages":["app"]}"#).unwrap();
        assert!(config.enabled);
        assert_eq!(config.packages, vec!["app".to_string()]);

        let config: InterceptionConfig = serde_json::from_str(r#"{"enabled":false}"#).unwrap();
        assert!(!config.enabled);
        assert!(config.packages.is_empty());
    }
}
