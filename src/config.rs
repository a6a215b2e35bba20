//! Configuration management for Agentline
//!
//! Reads the environment once at startup and provides typed, validated access
//! to settings. Fields are private so that a constructed `Config` always
//! satisfies its invariants; tests build synthetic configurations through
//! [`Config::new`] instead of mutating the process environment.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Environment variable naming the local model endpoint base URL
pub const ENV_BASE_URL: &str = "LLM_BASE_URL";
/// Environment variable naming the model identifier (or the literal "auto")
pub const ENV_MODEL: &str = "LLM_MODEL";
/// Environment variable setting the outbound call timeout in seconds
pub const ENV_TIMEOUT: &str = "HTTP_TIMEOUT";
/// Environment variable whose presence selects the managed engine as primary
pub const ENV_PROVIDER: &str = "STRANDS_PROVIDER";

/// Model identifier sentinel that lets the local client pick a default
pub const AUTO_MODEL: &str = "auto";

const DEFAULT_MODEL: &str = "qwen2.5-coder:7b";
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Which engine serves model calls first
///
/// `Local` sends every call to the local model client. `Managed` routes
/// through the managed agent runtime first, with a one-shot fallback to the
/// local client on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Local,
    Managed,
}

impl Provider {
    /// String label for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Managed => "managed",
        }
    }
}

/// Immutable application configuration
///
/// Loaded once at startup and passed into constructors; nothing reads the
/// environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    model: String,
    timeout_seconds: u64,
    provider: Provider,
}

impl Config {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `timeout_seconds` is zero or the
    /// model identifier is empty. An empty `base_url` is permitted: the
    /// local client rejects calls lazily, so a managed-only setup does not
    /// need an endpoint configured.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout_seconds: u64,
        provider: Provider,
    ) -> AppResult<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(AppError::Config(format!(
                "{} must not be empty (use \"{}\" to let the client pick)",
                ENV_MODEL, AUTO_MODEL
            )));
        }
        if timeout_seconds == 0 {
            return Err(AppError::Config(format!(
                "{} must be a positive number of seconds",
                ENV_TIMEOUT
            )));
        }

        Ok(Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            model,
            timeout_seconds,
            provider,
        })
    }

    /// Load configuration from the process environment
    ///
    /// Reads [`ENV_BASE_URL`], [`ENV_MODEL`], [`ENV_TIMEOUT`], and
    /// [`ENV_PROVIDER`] exactly once. Missing variables fall back to
    /// defaults; malformed values are configuration errors.
    pub fn from_env() -> AppResult<Self> {
        let base_url = std::env::var(ENV_BASE_URL).unwrap_or_default();
        let model = std::env::var(ENV_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let timeout_seconds = match std::env::var(ENV_TIMEOUT) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!(
                    "{} must be a positive integer number of seconds, got {:?}",
                    ENV_TIMEOUT, raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        // Presence selects the managed engine; the value itself is advisory.
        let provider = match std::env::var(ENV_PROVIDER) {
            Ok(_) => Provider::Managed,
            Err(_) => Provider::Local,
        };

        Self::new(base_url, model, timeout_seconds, provider)
    }

    /// Base URL of the local model endpoint (may be empty)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured model identifier (may be the literal "auto")
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether the model identifier requests automatic selection
    pub fn model_is_auto(&self) -> bool {
        self.model.eq_ignore_ascii_case(AUTO_MODEL)
    }

    /// Timeout budget for any single outbound model call, in seconds
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    /// Which engine is primary for this run
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Copy of this configuration with a different primary provider
    ///
    /// Used by `tick --engine` to override the environment selection for a
    /// single invocation.
    pub fn with_provider(&self, provider: Provider) -> Self {
        Self {
            provider,
            ..self.clone()
        }
    }
}
