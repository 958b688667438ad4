use std::str::FromStr;

use harmony_core::envelope::SuccessDefaults;
use harmony_core::error::CoreError;
use harmony_core::intercept::InterceptionConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Response envelope settings.
    pub harmony: HarmonySettings,
}

/// Settings for the response envelope interceptor.
#[derive(Debug, Clone)]
pub struct HarmonySettings {
    pub interception: InterceptionConfig,
    /// Code stamped on successful envelopes (default: `200`).
    pub success_code: String,
    /// Message stamped on successful envelopes (default: `operation succeeded`).
    pub success_message: String,
}

impl HarmonySettings {
    pub fn success_defaults(&self) -> SuccessDefaults<String, String> {
        SuccessDefaults::new(self.success_code.clone(), self.success_message.clone())
    }

    /// Read the `HARMONY_*` variables through `lookup`.
    ///
    /// | Env Var                  | Default               |
    /// |--------------------------|-----------------------|
    /// | `HARMONY_ENABLED`        | `true`                |
    /// | `HARMONY_PACKAGES`       | empty (match all)     |
    /// | `HARMONY_SUCCESS_CODE`   | `200`                 |
    /// | `HARMONY_SUCCESS_MESSAGE`| `operation succeeded` |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let enabled = parse_or(&lookup, "HARMONY_ENABLED", true)?;
        let packages = split_list(&lookup("HARMONY_PACKAGES").unwrap_or_default());
        let success_code = lookup("HARMONY_SUCCESS_CODE").unwrap_or_else(|| "200".into());
        let success_message =
            lookup("HARMONY_SUCCESS_MESSAGE").unwrap_or_else(|| "operation succeeded".into());

        Ok(Self {
            interception: InterceptionConfig { enabled, packages },
            success_code,
            success_message,
        })
    }

    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(env_lookup)
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    ///
    /// plus the `HARMONY_*` variables read by [`HarmonySettings::from_lookup`].
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000u16)?;
        let cors_origins = split_list(
            &lookup("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:5173".into()),
        );
        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let shutdown_timeout_secs = parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 30u64)?;
        let harmony = HarmonySettings::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            harmony,
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, CoreError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidArgument(format!("{key} has invalid value '{raw}'"))),
        None => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
