//! Managed agent runtime
//!
//! Capability trait for the managed engine plus the production
//! implementation backed by open-agent-sdk. The trait exists so the
//! adapter's fallback behavior can be tested with injected runtimes that
//! fail or count calls without any network access.

use crate::config::Config;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;

/// Capability contract for a managed agent runtime
///
/// "Send a prompt, receive a completion." Every failure mode is reported as
/// [`AppError::EngineUnavailable`] or [`AppError::Timeout`]; the adapter
/// decides what falls back and what surfaces.
#[async_trait]
pub trait ManagedRuntime: Send + Sync {
    /// Human-readable runtime name for logging
    fn name(&self) -> &str;

    /// Run a prompt to completion on the managed runtime
    async fn run(&self, prompt: &str) -> AppResult<String>;
}

/// Managed runtime backed by open-agent-sdk
///
/// Builds `AgentOptions` from the application configuration and collects the
/// streamed response. Construction validates the options eagerly so an
/// unusable runtime is detected before any call is made.
#[derive(Debug)]
pub struct OpenAgentRuntime {
    model: String,
    base_url: String,
    timeout_seconds: u64,
}

impl OpenAgentRuntime {
    /// Create a runtime from configuration
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EngineUnavailable`] when the configuration cannot
    /// drive the managed runtime: an empty base URL, the `auto` model
    /// sentinel (the managed runtime needs a concrete model identifier), or
    /// options the SDK rejects.
    pub fn new(config: &Config) -> AppResult<Self> {
        if config.base_url().is_empty() {
            return Err(AppError::EngineUnavailable {
                reason: format!(
                    "{} is not configured for the managed runtime",
                    crate::config::ENV_BASE_URL
                ),
            });
        }
        if config.model_is_auto() {
            return Err(AppError::EngineUnavailable {
                reason: "managed runtime requires a concrete model identifier, not \"auto\""
                    .to_string(),
            });
        }

        let runtime = Self {
            model: config.model().to_string(),
            base_url: config.base_url().to_string(),
            timeout_seconds: config.timeout_seconds(),
        };

        // Validate options eagerly; a rejected build means the runtime can
        // never serve a call.
        runtime.build_options()?;

        Ok(runtime)
    }

    fn build_options(&self) -> AppResult<open_agent::AgentOptions> {
        open_agent::AgentOptions::builder()
            .model(&self.model)
            .base_url(&self.base_url)
            .build()
            .map_err(|e| AppError::EngineUnavailable {
                reason: format!("failed to build agent options: {}", e),
            })
    }
}

#[async_trait]
impl ManagedRuntime for OpenAgentRuntime {
    fn name(&self) -> &str {
        "open-agent"
    }

    async fn run(&self, prompt: &str) -> AppResult<String> {
        use futures::StreamExt;
        use tokio::time::{Duration, timeout};

        let options = self.build_options()?;
        let timeout_duration = Duration::from_secs(self.timeout_seconds);

        let collected = timeout(timeout_duration, async {
            let mut stream = open_agent::query(prompt, &options).await.map_err(|e| {
                AppError::EngineUnavailable {
                    reason: format!("managed query failed to start: {}", e),
                }
            })?;

            let mut response_text = String::new();
            while let Some(result) = stream.next().await {
                match result {
                    Ok(block) => {
                        use open_agent::ContentBlock;
                        if let ContentBlock::Text(text_block) = block {
                            response_text.push_str(&text_block.text);
                        }
                    }
                    Err(e) => {
                        return Err(AppError::EngineUnavailable {
                            reason: format!(
                                "stream error after {} bytes: {}",
                                response_text.len(),
                                e
                            ),
                        });
                    }
                }
            }

            Ok::<String, AppError>(response_text)
        })
        .await;

        match collected {
            Ok(Ok(text)) => {
                tracing::debug!(
                    runtime = self.name(),
                    response_length = text.len(),
                    "Managed runtime call completed"
                );
                Ok(text)
            }
            Ok(Err(e)) => Err(e),
            Err(_elapsed) => Err(AppError::Timeout {
                endpoint: self.base_url.clone(),
                timeout_seconds: self.timeout_seconds,
            }),
        }
    }
}
