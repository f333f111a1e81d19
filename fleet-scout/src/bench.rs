//! Throughput benchmarking across the fleet.
//!
//! Hosts are benchmarked in parallel, up to `bench.workers` at a time. Models on
//! the same host are always benchmarked one after another: concurrent
//! generations on one machine compete for the same compute and would skew
//! every measurement taken there.
//!
//! Each (host, model) pair goes through:
//! 1. a warm-up request with the long load timeout, so weights are resident
//!    before timing starts (a connection failure or timeout ends the pair as
//!    `Failed (Warmup)`; an error status still proceeds to the measured runs);
//! 2. `runs` measured requests with the short generation timeout;
//! 3. aggregation into the mean tokens/second, or `Failed` without samples;
//! 4. a cooldown pause before the next model, whatever the outcome.

use std::sync::Arc;

use fleet_scout_common::{
    BenchmarkOutcome, BenchmarkResults, FailureKind, GenerateRequest, HostResults, ModelInventory,
};
use reqwest::Client;

use crate::config::BenchConfig;
use crate::ollama::OllamaClient;
use crate::pool::run_bounded;

/// Benchmark every (host, model) pair of the inventory.
///
/// Every pair in the inventory gets exactly one outcome. Each host task
/// builds its own result map; maps are merged only after all tasks finish.
pub async fn benchmark(
    inventory: &ModelInventory,
    http_client: &Client,
    config: &BenchConfig,
) -> BenchmarkResults {
    tracing::info!(
        "Starting benchmarks on {} hosts ({} concurrent, {} runs per model)",
        inventory.len(),
        config.workers,
        config.runs
    );

    let config = Arc::new(config.clone());
    let per_host = run_bounded(inventory.clone(), config.workers, |(host, models)| {
        let client = OllamaClient::with_client(http_client.clone(), &host.endpoint());
        let config = config.clone();
        async move {
            tracing::info!("Benchmarking {} ({} models)", host, models.len());
            let results = benchmark_host(&client, &models, &config).await;
            (host, results)
        }
    })
    .await;

    per_host.into_iter().collect()
}

/// Benchmark the models of one host strictly in sequence.
pub async fn benchmark_host(
    client: &OllamaClient,
    models: &[String],
    config: &BenchConfig,
) -> HostResults {
    let mut results = HostResults::new();

    for model in models {
        let outcome = benchmark_model(client, model, config).await;
        tracing::info!("{} on {}: {}", model, client.base_url(), outcome);
        results.insert(model.clone(), outcome);

        tokio::time::sleep(config.cooldown()).await;
    }

    results
}

/// Warm up one model, then measure it `runs` times.
pub async fn benchmark_model(
    client: &OllamaClient,
    model: &str,
    config: &BenchConfig,
) -> BenchmarkOutcome {
    let request = generate_request(model, config);

    if let Err(e) = client.warm_up(&request, config.load_timeout()).await {
        tracing::warn!("Warm-up of {} on {} failed: {}", model, client.base_url(), e);
        return BenchmarkOutcome::Failed(FailureKind::Warmup);
    }

    let mut samples = Vec::with_capacity(config.runs as usize);
    for run in 1..=config.runs {
        match client.generate(&request, config.bench_timeout()).await {
            Ok(response) => match response.tokens_per_second() {
                Some(tps) => samples.push(tps),
                None => tracing::debug!("Run {} of {}: no usable timing reported", run, model),
            },
            Err(e) => tracing::debug!(
                "Run {} of {} on {} failed: {}",
                run,
                model,
                client.base_url(),
                e
            ),
        }
    }

    BenchmarkOutcome::from_samples(&samples)
}

/// The payload shared by the warm-up and every measured run.
pub fn generate_request(model: &str, config: &BenchConfig) -> GenerateRequest {
    GenerateRequest {
        model: model.to_string(),
        prompt: config.prompt.clone(),
        stream: false,
        options: config.options(),
    }
}
