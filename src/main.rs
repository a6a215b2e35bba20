//! Agentline CLI driver
//!
//! Parses the command line, loads configuration from the environment, and
//! invokes one top-level pipeline operation per invocation.

use agentline::agent::Agent;
use agentline::cli::{Cli, Command, EngineArg, generate_env_template};
use agentline::client::LocalModelClient;
use agentline::config::{Config, Provider};
use agentline::engine::ModelAdapter;
use agentline::router::MultiAgentRouter;
use agentline::run_id::RunId;
use agentline::telemetry;
use agentline::workflow::WorkflowEngine;
use clap::Parser;
use std::sync::Arc;
use tracing::Instrument;

const TICK_PROMPT: &str = "You are a helpful assistant.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    telemetry::init("info");

    let run_id = RunId::new();
    let span = tracing::info_span!("run", run_id = %run_id);

    run(cli.command).instrument(span).await
}

async fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    tracing::debug!(
        provider = config.provider().as_str(),
        model = config.model(),
        timeout_seconds = config.timeout_seconds(),
        "Configuration loaded"
    );

    match command {
        Command::Models => {
            let client = LocalModelClient::new(&config)?;
            let listing = client.list_models().await?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }

        Command::Tick {
            name,
            question,
            engine,
        } => {
            // The engine flag overrides the environment-selected provider
            // for this invocation only.
            let config = match engine {
                EngineArg::Strands => config.with_provider(Provider::Managed),
                EngineArg::Basic => config.with_provider(Provider::Local),
            };
            let adapter = Arc::new(ModelAdapter::from_config(&config)?);
            let agent = Agent::new(&name, TICK_PROMPT, adapter);

            let question = question.unwrap_or_else(|| {
                format!("Summarize the session context: {{\"name\": \"{}\"}}", name)
            });
            let answer = agent.respond(&question).await?;
            println!("{}", answer);
        }

        Command::Workflow { topic } => {
            let adapter = Arc::new(ModelAdapter::from_config(&config)?);
            let workflow = WorkflowEngine::three_phase(adapter);
            let report = workflow.run(&topic).await?;
            println!("{}", report);
        }

        Command::Research { query } => {
            let adapter = Arc::new(ModelAdapter::from_config(&config)?);
            let workflow = WorkflowEngine::research_pipeline(adapter);
            let report = workflow.run(&query).await?;
            println!("{}", report);
        }

        Command::MultiAgent { query } => {
            let adapter = Arc::new(ModelAdapter::from_config(&config)?);
            let router = MultiAgentRouter::new(adapter);
            let routed = router.dispatch(&query).await?;
            tracing::info!(
                category = %routed.category,
                specialist = %routed.specialist,
                "Dispatch complete"
            );
            println!("{}", routed.content);
        }

        Command::EnvTemplate { output } => match output {
            Some(path) => {
                std::fs::write(&path, generate_env_template())?;
                eprintln!("Wrote environment template to {}", path);
            }
            None => print!("{}", generate_env_template()),
        },
    }

    Ok(())
}
