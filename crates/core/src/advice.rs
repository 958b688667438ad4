//! Response advice: the interception predicate and the envelope wrapper bundled
//! with the process-wide configuration they read.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::envelope::{Envelope, Outcome, SuccessDefaults};
use crate::error::CoreError;
use crate::intercept::{should_intercept, CandidateHandler, InterceptionConfig};

/// Shared, atomically replaceable interception config.
///
/// Readers always observe one complete config; [`ConfigHandle::replace`]
/// publishes a new object rather than mutating the current one.
#[derive(Debug, Clone)]
pub struct ConfigHandle(Arc<ArcSwap<InterceptionConfig>>);

impl ConfigHandle {
    pub fn new(config: InterceptionConfig) -> Self {
        Self(Arc::new(ArcSwap::from_pointee(config)))
    }

    pub fn snapshot(&self) -> Arc<InterceptionConfig> {
        self.0.load_full()
    }

    pub fn replace(&self, config: InterceptionConfig) {
        self.0.store(Arc::new(config));
    }
}

impl From<InterceptionConfig> for ConfigHandle {
    fn from(config: InterceptionConfig) -> Self {
        Self::new(config)
    }
}

/// Decides which responses to wrap and wraps them.
///
/// Cheap to clone; clones share the same [`ConfigHandle`].
#[derive(Debug, Clone)]
pub struct ResponseAdvice<C, M> {
    defaults: SuccessDefaults<C, M>,
    config: ConfigHandle,
}

impl<C: Clone, M: Clone> ResponseAdvice<C, M> {
    pub fn builder() -> ResponseAdviceBuilder<C, M> {
        ResponseAdviceBuilder::default()
    }

    /// Whether the candidate's response should be wrapped under the current config.
    pub fn supports(&self, candidate: &CandidateHandler) -> bool {
        should_intercept(candidate, &self.config.0.load())
    }

    pub fn wrap<D>(&self, outcome: Outcome<C, M, D>) -> Envelope<C, M, D> {
        self.defaults.wrap(outcome)
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }
}

/// Builder for [`ResponseAdvice`]. Both collaborators are required.
#[derive(Debug)]
pub struct ResponseAdviceBuilder<C, M> {
    defaults: Option<SuccessDefaults<C, M>>,
    config: Option<ConfigHandle>,
}

impl<C, M> Default for ResponseAdviceBuilder<C, M> {
    fn default() -> Self {
        Self {
            defaults: None,
            config: None,
        }
    }
}

impl<C, M> ResponseAdviceBuilder<C, M> {
    pub fn defaults(mut self, defaults: SuccessDefaults<C, M>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn config(mut self, config: impl Into<ConfigHandle>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn build(self) -> Result<ResponseAdvice<C, M>, CoreError> {
        let defaults = self.defaults.ok_or_else(|| {
            CoreError::InvalidArgument("Success defaults must not be missing".into())
        })?;
        let config = self.config.ok_or_else(|| {
            CoreError::InvalidArgument("Interception config must not be missing".into())
        })?;
        Ok(ResponseAdvice { defaults, config })
    }
}
