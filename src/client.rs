//! Local model client
//!
//! HTTP client for an Ollama-compatible model endpoint. Used directly when no
//! managed runtime is configured, and as the fallback target when the managed
//! engine fails.
//!
//! The endpoint is asked for non-streaming responses, but some servers return
//! a streaming NDJSON or SSE body anyway; `generate` accepts both by
//! accumulating per-line chunks.

use crate::config::Config;
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One entry from the endpoint's model listing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelTag {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

impl ModelTag {
    /// Preferred identifier for this tag (`model` field, falling back to `name`)
    pub fn identifier(&self) -> Option<&str> {
        self.model.as_deref().or(self.name.as_deref())
    }
}

/// Response from `GET /api/tags`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelListing {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

/// HTTP client for the local model endpoint
#[derive(Debug, Clone)]
pub struct LocalModelClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    model_is_auto: bool,
    timeout_seconds: u64,
}

impl LocalModelClient {
    /// Create a client from configuration
    ///
    /// An empty base URL is accepted; calls fail with a configuration error
    /// only when actually attempted. The configured timeout applies to every
    /// request made by this client.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            model: config.model().to_string(),
            model_is_auto: config.model_is_auto(),
            timeout_seconds: config.timeout_seconds(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn require_base_url(&self) -> AppResult<&str> {
        if self.base_url.is_empty() {
            return Err(AppError::Config(format!(
                "{} is not configured; set it via the environment",
                crate::config::ENV_BASE_URL
            )));
        }
        Ok(&self.base_url)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::Timeout {
                endpoint: self.base_url.clone(),
                timeout_seconds: self.timeout_seconds,
            }
        } else {
            AppError::ModelQueryFailed {
                endpoint: self.base_url.clone(),
                reason: err.to_string(),
            }
        }
    }

    /// List models advertised by the endpoint (`GET /api/tags`)
    pub async fn list_models(&self) -> AppResult<ModelListing> {
        let base = self.require_base_url()?;
        let url = format!("{}/api/tags", base);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ModelQueryFailed {
                endpoint: self.base_url.clone(),
                reason: format!("model listing returned HTTP {}", status),
            });
        }

        response
            .json::<ModelListing>()
            .await
            .map_err(|e| AppError::ModelQueryFailed {
                endpoint: self.base_url.clone(),
                reason: format!("failed to decode model listing: {}", e),
            })
    }

    /// Resolve the model identifier to send with generation requests
    ///
    /// A concrete configured model is used as-is. The `auto` sentinel asks
    /// the endpoint for its tag list and picks the most recently modified
    /// model; an empty listing is an error rather than a silent fallback.
    pub async fn preferred_model(&self) -> AppResult<String> {
        if !self.model_is_auto {
            return Ok(self.model.clone());
        }

        let listing = self.list_models().await?;
        let latest = select_latest_model(&listing);

        match latest {
            Some(model) => {
                tracing::debug!(model = %model, "Auto-selected most recently modified model");
                Ok(model)
            }
            None => Err(AppError::ModelQueryFailed {
                endpoint: self.base_url.clone(),
                reason: "no models available for auto selection".to_string(),
            }),
        }
    }

    /// Generate a completion for a prompt (`POST /api/generate`)
    pub async fn generate(&self, prompt: &str) -> AppResult<String> {
        let base = self.require_base_url()?;
        let url = format!("{}/api/generate", base);
        let model = self.preferred_model().await?;

        tracing::debug!(
            endpoint = %self.base_url,
            model = %model,
            prompt_length = prompt.len(),
            "Sending generate request to local endpoint"
        );

        let payload = serde_json::json!({
            "model": model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ModelQueryFailed {
                endpoint: self.base_url.clone(),
                reason: format!("generate returned HTTP {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let text = extract_completion(&body);

        tracing::info!(
            endpoint = %self.base_url,
            model = %model,
            response_length = text.len(),
            "Local generate request completed"
        );

        Ok(text)
    }
}

/// Pick the most recently modified model from a listing
///
/// `modified_at` is parsed as RFC 3339; entries with missing or unparseable
/// timestamps sort oldest. Returns `None` for an empty listing or when no
/// entry carries an identifier.
fn select_latest_model(listing: &ModelListing) -> Option<String> {
    use chrono::{DateTime, Utc};

    listing
        .models
        .iter()
        .filter_map(|tag| {
            let id = tag.identifier()?;
            let ts = tag
                .modified_at
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            Some((ts, id.to_string()))
        })
        .max_by_key(|(ts, _)| *ts)
        .map(|(_, id)| id)
}

/// Extract completion text from a generate response body
///
/// Tries a single JSON object first (`response` or `text` field). If the body
/// is not one JSON document, treats it as NDJSON/SSE: strips `data:` prefixes
/// and accumulates the chunk fields of each parseable line.
fn extract_completion(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return completion_chunk(&value).unwrap_or_default();
    }

    let mut parts = String::new();
    for raw_line in body.lines() {
        let mut line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            line = rest.trim();
        }
        let Ok(value) = serde_json::from_str::<serde_json::Value>(line) else {
            // Non-JSON lines (SSE comments, keepalives) are skipped.
            continue;
        };
        if let Some(chunk) = completion_chunk(&value) {
            parts.push_str(&chunk);
        }
    }
    parts
}

fn completion_chunk(value: &serde_json::Value) -> Option<String> {
    value
        .get("response")
        .or_else(|| value.get("text"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
