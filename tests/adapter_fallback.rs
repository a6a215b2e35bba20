//! Integration tests for engine selection and the one-shot fallback
//!
//! Verifies the adapter contract: a managed failure is retried against the
//! local client exactly once (never twice), a managed success never touches
//! the local client, and local-only configurations never construct a managed
//! engine.

use agentline::client::LocalModelClient;
use agentline::config::{Config, Provider};
use agentline::engine::{EngineKind, ManagedRuntime, ModelAdapter};
use agentline::error::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Managed runtime stub that counts calls and answers per a fixed script
struct ScriptedRuntime {
    calls: Arc<AtomicUsize>,
    outcome: Result<String, String>,
}

impl ScriptedRuntime {
    fn failing(calls: Arc<AtomicUsize>) -> Self {
        Self {
            calls,
            outcome: Err("simulated runtime outage".to_string()),
        }
    }

    fn succeeding(calls: Arc<AtomicUsize>, answer: &str) -> Self {
        Self {
            calls,
            outcome: Ok(answer.to_string()),
        }
    }
}

#[async_trait]
impl ManagedRuntime for ScriptedRuntime {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn run(&self, _prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(answer) => Ok(answer.clone()),
            Err(reason) => Err(AppError::EngineUnavailable {
                reason: reason.clone(),
            }),
        }
    }
}

fn local_client(server: &MockServer) -> LocalModelClient {
    let config = Config::new(server.uri(), "test-model", 5, Provider::Local)
        .expect("valid test config");
    LocalModelClient::new(&config).expect("client builds")
}

#[tokio::test]
async fn test_managed_failure_falls_back_to_local_exactly_once() {
    let server = MockServer::start().await;

    // expect(1) is the property under test: exactly one local attempt.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"response": "local answer"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let managed_calls = Arc::new(AtomicUsize::new(0));
    let adapter = ModelAdapter::with_runtime(
        Box::new(ScriptedRuntime::failing(managed_calls.clone())),
        local_client(&server),
    );

    let answer = adapter
        .generate("role", "question")
        .await
        .expect("fallback must succeed");

    assert_eq!(answer, "local answer");
    assert_eq!(managed_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_managed_and_local_failure_is_a_single_terminal_error() {
    let server = MockServer::start().await;

    // Still exactly one local attempt even when it fails.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let managed_calls = Arc::new(AtomicUsize::new(0));
    let adapter = ModelAdapter::with_runtime(
        Box::new(ScriptedRuntime::failing(managed_calls.clone())),
        local_client(&server),
    );

    let err = adapter
        .generate("role", "question")
        .await
        .expect_err("both backends down must surface an error");

    // The surfaced error is the local one, not the managed outage.
    assert!(matches!(err, AppError::ModelQueryFailed { .. }));
    assert_eq!(managed_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_managed_success_never_touches_local() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "unused"})),
        )
        .expect(0)
        .mount(&server)
        .await;

    let managed_calls = Arc::new(AtomicUsize::new(0));
    let adapter = ModelAdapter::with_runtime(
        Box::new(ScriptedRuntime::succeeding(
            managed_calls.clone(),
            "managed answer",
        )),
        local_client(&server),
    );

    let answer = adapter
        .generate("role", "question")
        .await
        .expect("managed call succeeds");

    assert_eq!(answer, "managed answer");
    assert_eq!(managed_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_local_provider_builds_local_engine() {
    let config = Config::new("http://127.0.0.1:9", "test-model", 5, Provider::Local)
        .expect("valid test config");
    let adapter = ModelAdapter::from_config(&config).expect("adapter builds");

    assert_eq!(adapter.kind(), EngineKind::Local);
}

#[tokio::test]
async fn test_unusable_managed_config_degrades_to_local() {
    // "auto" cannot drive the managed runtime, so initialization fails and
    // the adapter must degrade rather than error.
    let config = Config::new("http://127.0.0.1:9", "auto", 5, Provider::Managed)
        .expect("valid test config");
    let adapter = ModelAdapter::from_config(&config).expect("degradation is not an error");

    assert_eq!(adapter.kind(), EngineKind::Local);
}

#[tokio::test]
async fn test_tick_scenario_local_provider_answers_without_managed_engine() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "4"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::new(server.uri(), "test-model", 5, Provider::Local)
        .expect("valid test config");
    let adapter = ModelAdapter::from_config(&config).expect("adapter builds");
    assert_eq!(adapter.kind(), EngineKind::Local);

    let answer = adapter
        .generate("You are a helpful assistant.", "2+2")
        .await
        .expect("local call succeeds");

    assert!(!answer.is_empty());
}
