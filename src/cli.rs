//! Command-line interface for Agentline
//!
//! Provides argument parsing and subcommand handling for the agentline binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Multi-agent LLM pipelines over local and managed runtimes
#[derive(Parser)]
#[command(name = "agentline")]
#[command(version)]
#[command(about = "Multi-agent LLM pipelines over local and managed runtimes")]
#[command(
    long_about = "Agentline runs predefined language-model agent pipelines: single-turn \
    queries, fixed multi-phase workflows, and a dynamic router that dispatches queries \
    to domain specialists. Configuration comes from the environment (LLM_BASE_URL, \
    LLM_MODEL, HTTP_TIMEOUT, STRANDS_PROVIDER)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Engine selection for single-turn queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    /// Local model client only
    Basic,
    /// Managed runtime primary, local client as fallback
    Strands,
}

#[derive(Subcommand)]
pub enum Command {
    /// List model identifiers available at the local endpoint
    Models,

    /// Run a single agent step
    Tick {
        /// Session name (used in logs and the default question)
        #[arg(long, default_value = "session")]
        name: String,

        /// User prompt; a session summary request is used when omitted
        #[arg(long)]
        question: Option<String>,

        /// Which engine serves the call
        #[arg(long, value_enum, default_value = "basic")]
        engine: EngineArg,
    },

    /// Run the three-phase workflow (research -> critique -> finalize)
    Workflow {
        /// Topic to research
        #[arg(long, default_value = "modern manufacturing sustainability")]
        topic: String,
    },

    /// Run the research pipeline (researcher -> analyst -> writer)
    Research {
        /// Research query or factual claim to investigate
        #[arg(long)]
        query: String,
    },

    /// Route a query to the matching domain specialist
    MultiAgent {
        /// Free-text query to classify and dispatch
        #[arg(long)]
        query: String,
    },

    /// Generate a template .env file
    EnvTemplate {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template environment file content
pub fn generate_env_template() -> &'static str {
    r#"# Agentline Configuration
# =======================
#
# Agentline reads its configuration from the environment once at startup.
# Copy this file to .env (or export the variables) and adjust as needed.

# Base URL of the local, Ollama-compatible model endpoint.
# May be left empty when the managed runtime is used exclusively.
LLM_BASE_URL=http://localhost:11434

# Model identifier to use for generation.
# The literal "auto" picks the most recently modified model the endpoint
# advertises. Note: the managed runtime requires a concrete identifier.
LLM_MODEL=qwen2.5-coder:7b

# Timeout budget for any single outbound model call, in seconds.
HTTP_TIMEOUT=60

# Uncomment to route calls through the managed agent runtime first, with a
# one-shot fallback to the local client on failure. The value is advisory;
# presence of the variable selects the managed engine.
#STRANDS_PROVIDER=ollama
"#
}
