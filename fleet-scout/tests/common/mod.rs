//! Mock Ollama servers for integration tests.

#![allow(dead_code)]

use fleet_scout::BenchConfig;
use fleet_scout_common::ActiveHost;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Body of a `/api/tags` response listing the given models.
pub fn tags_json(models: &[&str]) -> serde_json::Value {
    let models: Vec<serde_json::Value> = models
        .iter()
        .map(|name| json!({"name": name, "size": 4_661_224_676u64}))
        .collect();
    json!({ "models": models })
}

/// Body of a non-streaming `/api/generate` response.
pub fn generate_json(eval_count: u64, eval_duration_ns: u64) -> serde_json::Value {
    json!({
        "model": "llama3",
        "response": "The internet began as ARPANET...",
        "done": true,
        "eval_count": eval_count,
        "eval_duration": eval_duration_ns
    })
}

pub fn tags_mock(models: &[&str]) -> Mock {
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags_json(models)))
}

/// Generation at 50 tokens/second (100 tokens in 2s).
pub fn generate_mock() -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_json(100, 2_000_000_000)))
}

/// A server listing `models` and generating at 50 tokens/second.
pub async fn mock_ollama(models: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    tags_mock(models).mount(&server).await;
    generate_mock().mount(&server).await;
    server
}

pub fn host_for(server: &MockServer) -> ActiveHost {
    let addr = server.address();
    ActiveHost::new(addr.ip().to_string(), addr.port())
}

/// Benchmark settings with no cooldown and short timeouts.
pub fn fast_bench_config(runs: u32) -> BenchConfig {
    BenchConfig {
        runs,
        cooldown_secs: 0,
        load_timeout_secs: 5,
        bench_timeout_secs: 5,
        workers: 4,
        ..BenchConfig::default()
    }
}

/// Model names of every generate request the server received, in arrival order.
pub async fn generate_models(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/api/generate")
        .filter_map(|r| serde_json::from_slice::<serde_json::Value>(&r.body).ok())
        .filter_map(|v| v["model"].as_str().map(String::from))
        .collect()
}
