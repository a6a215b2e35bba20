//! Agentline - multi-agent LLM pipelines over local and managed runtimes
//!
//! This library provides the agent execution core behind the `agentline` CLI:
//! an engine adapter that prefers a managed agent runtime with transparent
//! fallback to a local model endpoint, fixed multi-phase agent workflows, and
//! a dynamic router that dispatches free-text queries to domain specialists.

pub mod agent;
pub mod cli;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod router;
pub mod run_id;
pub mod telemetry;
pub mod workflow;
