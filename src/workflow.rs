//! Fixed-pipeline workflow engine
//!
//! Chains specialist agents in a declared order: each stage's output becomes
//! the next stage's input verbatim, and only the terminal stage's output is
//! returned. Stage progress is emitted as tracing events (stage name only);
//! a failing stage aborts the run with the stage identified.

use crate::agent::Agent;
use crate::engine::ModelAdapter;
use crate::error::AppResult;
use std::sync::Arc;

const RESEARCH_PROMPT: &str = "You are a senior researcher. \
    Create a concise research brief with 3 bullet points about the topic you are given.";

const CRITIQUE_PROMPT: &str = "You are a critical reviewer. \
    Review the brief you are given and list 3 risks or gaps.";

const FINALIZE_PROMPT: &str = "You are an expert strategist. \
    Using the reviewed brief you are given, produce a final report \
    with 5 concrete, actionable steps.";

const RESEARCHER_PROMPT: &str = "You are a Researcher Agent that gathers information. \
    1. Determine if the input is a research query or factual claim \
    2. Use your available knowledge to find relevant information \
    3. Include source references and keep findings under 500 words";

const ANALYST_PROMPT: &str = "You are an Analyst Agent that verifies information. \
    1. For factual claims: Rate accuracy from 1-5 and correct if needed \
    2. For research queries: Identify 3-5 key insights \
    3. Evaluate source reliability and keep analysis under 400 words";

const WRITER_PROMPT: &str = "You are a Writer Agent that creates clear reports. \
    1. For fact-checks: State whether claims are true or false \
    2. For research: Present key insights in a logical structure \
    3. Keep reports under 500 words with brief source mentions";

/// Ordered pipeline of agents
pub struct WorkflowEngine {
    name: &'static str,
    stages: Vec<Agent>,
}

impl WorkflowEngine {
    /// Build a pipeline from an ordered list of stage agents
    ///
    /// Stages execute strictly in the given order, each exactly once.
    pub fn new(name: &'static str, stages: Vec<Agent>) -> Self {
        Self { name, stages }
    }

    /// Three-phase workflow: research -> critique -> finalize
    pub fn three_phase(adapter: Arc<ModelAdapter>) -> Self {
        Self::new(
            "three-phase",
            vec![
                Agent::new("research", RESEARCH_PROMPT, adapter.clone()),
                Agent::new("critique", CRITIQUE_PROMPT, adapter.clone()),
                Agent::new("finalize", FINALIZE_PROMPT, adapter),
            ],
        )
    }

    /// Research pipeline: researcher -> analyst -> writer
    pub fn research_pipeline(adapter: Arc<ModelAdapter>) -> Self {
        Self::new(
            "research",
            vec![
                Agent::new("researcher", RESEARCHER_PROMPT, adapter.clone()),
                Agent::new("analyst", ANALYST_PROMPT, adapter.clone()),
                Agent::new("writer", WRITER_PROMPT, adapter),
            ],
        )
    }

    /// Pipeline name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stage names in execution order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(Agent::name).collect()
    }

    /// Run the pipeline to completion
    ///
    /// Returns the terminal stage's output; intermediate outputs are never
    /// returned to the caller. No stage is retried: the first failure aborts
    /// the run as [`crate::error::AppError::StageFailed`] naming the stage.
    pub async fn run(&self, initial_input: &str) -> AppResult<String> {
        let total = self.stages.len();
        let mut current = initial_input.to_string();

        for (index, stage) in self.stages.iter().enumerate() {
            tracing::info!(
                workflow = self.name,
                stage = %stage.name(),
                position = index + 1,
                total_stages = total,
                "Workflow stage starting"
            );

            current = stage
                .respond(&current)
                .await
                .map_err(|e| e.at_stage(stage.name()))?;

            tracing::info!(
                workflow = self.name,
                stage = %stage.name(),
                output_length = current.len(),
                "Workflow stage completed"
            );
        }

        Ok(current)
    }
}
