//! Agent
//!
//! A named role bound to a system prompt and an engine adapter. Agents are
//! stateless: nothing is remembered between calls, within or across
//! invocations.

use crate::engine::ModelAdapter;
use crate::error::AppResult;
use std::sync::Arc;

/// A named role over the engine adapter
pub struct Agent {
    name: String,
    system_prompt: String,
    adapter: Arc<ModelAdapter>,
}

impl Agent {
    /// Create an agent bound to a role prompt
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        adapter: Arc<ModelAdapter>,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            adapter,
        }
    }

    /// Agent name (used in logs and stage-failure reports)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role definition this agent answers under
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Answer one input under this agent's role
    ///
    /// Delegates to the adapter; errors propagate unchanged.
    pub async fn respond(&self, input: &str) -> AppResult<String> {
        tracing::debug!(
            agent = %self.name,
            input_length = input.len(),
            "Agent responding"
        );
        self.adapter.generate(&self.system_prompt, input).await
    }
}
