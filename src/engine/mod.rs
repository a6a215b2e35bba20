//! Engine adapter
//!
//! Selects between the managed agent runtime and the local model client and
//! hides the distinction from callers: a managed failure is retried against
//! the local client exactly once, so callers observe either a success or a
//! single terminal error, never which backend served the request.

pub mod managed;

pub use managed::{ManagedRuntime, OpenAgentRuntime};

use crate::client::LocalModelClient;
use crate::config::{Config, Provider};
use crate::error::AppResult;

/// Which backend variant an adapter was constructed with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Managed runtime primary, local client as one-shot fallback
    Managed,
    /// Local client only
    Local,
}

impl EngineKind {
    /// String label for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Managed => "managed",
            Self::Local => "local",
        }
    }
}

enum Engine {
    Managed(Box<dyn ManagedRuntime>),
    Local,
}

/// Adapter over the two engine variants
///
/// Constructed once per invocation from configuration; stateless between
/// calls and never caches responses.
pub struct ModelAdapter {
    engine: Engine,
    local: LocalModelClient,
}

impl ModelAdapter {
    /// Build an adapter from configuration
    ///
    /// The managed runtime is primary only when the provider selects it
    /// *and* it initializes; an initialization failure is logged and the
    /// adapter degrades to the local client instead of propagating.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let local = LocalModelClient::new(config)?;

        let engine = match config.provider() {
            Provider::Managed => match OpenAgentRuntime::new(config) {
                Ok(runtime) => Engine::Managed(Box::new(runtime)),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Managed runtime unavailable at startup, using local client"
                    );
                    Engine::Local
                }
            },
            Provider::Local => Engine::Local,
        };

        Ok(Self { engine, local })
    }

    /// Build an adapter with an injected managed runtime
    ///
    /// Test seam: lets fallback behavior be exercised with runtimes that
    /// fail or count calls, without touching the network.
    pub fn with_runtime(runtime: Box<dyn ManagedRuntime>, local: LocalModelClient) -> Self {
        Self {
            engine: Engine::Managed(runtime),
            local,
        }
    }

    /// Build a local-only adapter
    pub fn local_only(local: LocalModelClient) -> Self {
        Self {
            engine: Engine::Local,
            local,
        }
    }

    /// Which engine variant this adapter was constructed with
    pub fn kind(&self) -> EngineKind {
        match self.engine {
            Engine::Managed(_) => EngineKind::Managed,
            Engine::Local => EngineKind::Local,
        }
    }

    /// Generate a completion for a role-scoped request
    ///
    /// Composes the system prompt and user input into a single transcript
    /// prompt and dispatches it. With a managed engine, any call failure
    /// (timeouts included) triggers exactly one retry of the same request
    /// against the local client; the local error, if any, is terminal.
    pub async fn generate(&self, system_prompt: &str, input: &str) -> AppResult<String> {
        let prompt = compose_prompt(system_prompt, input);

        match &self.engine {
            Engine::Managed(runtime) => match runtime.run(&prompt).await {
                Ok(text) => Ok(text),
                Err(e) => {
                    tracing::warn!(
                        runtime = runtime.name(),
                        error = %e,
                        "Managed engine call failed, falling back to local client"
                    );
                    self.local.generate(&prompt).await
                }
            },
            Engine::Local => self.local.generate(&prompt).await,
        }
    }
}

/// Compose a role prompt and user input into a single transcript prompt
///
/// Bracketed-role transcript format; the trailing assistant line cues the
/// model to answer rather than continue the user turn.
fn compose_prompt(system_prompt: &str, input: &str) -> String {
    format!(
        "[system] {}\n[user] {}\n[assistant] Provide a concise answer.",
        system_prompt, input
    )
}
