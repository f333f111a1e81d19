//! End-to-end pipeline tests using a static host list and mock Ollama servers.

mod common;

use std::path::PathBuf;

use fleet_scout::export::read_routing_csv;
use fleet_scout::{pipeline, Config, OutputPlan, ScoutError, StaticMembers};
use fleet_scout_common::{ProxyConfig, RoutingEntry};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

use common::{fast_bench_config, mock_ollama, tags_mock};

fn test_config(port: u16) -> Config {
    let mut config = Config::default();
    config.probe.port = port;
    config.probe.timeout_ms = 300;
    config.inventory.timeout_secs = 2;
    config.bench = fast_bench_config(3);
    config
}

fn members(addresses: &[&str]) -> StaticMembers {
    StaticMembers::new(addresses.iter().map(|a| a.to_string()).collect())
}

fn output_plan(dir: &tempfile::TempDir, csv: bool, proxy: bool) -> (OutputPlan, PathBuf, PathBuf) {
    let csv_path = dir.path().join("routes.csv");
    let proxy_path = dir.path().join("proxy.json");
    let plan = OutputPlan {
        routing_csv: csv.then(|| csv_path.clone()),
        proxy_json: proxy.then(|| proxy_path.clone()),
    };
    (plan, csv_path, proxy_path)
}

#[tokio::test]
async fn test_discovery_to_routing_table() {
    let server = mock_ollama(&["llama3"]).await;
    let port = server.address().port();
    let dir = tempfile::tempdir().unwrap();
    let (plan, csv_path, _) = output_plan(&dir, true, false);

    // Only 127.0.0.1 has the mock server listening.
    let source = members(&["127.0.0.1", "127.0.0.2"]);
    let report = pipeline::run(&test_config(port), &source, &plan)
        .await
        .unwrap();

    assert_eq!(report.inventory.len(), 1);
    let expected = vec![RoutingEntry {
        model: "llama3".to_string(),
        route: "ollama/llama3".to_string(),
        endpoint: format!("http://127.0.0.1:{}", port),
        tps: 50.0,
    }];
    assert_eq!(report.table.as_deref(), Some(expected.as_slice()));
    assert!(report.proxy.is_none());

    assert_eq!(read_routing_csv(&csv_path).unwrap(), expected);
}

#[tokio::test]
async fn test_no_active_hosts_writes_nothing() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let (plan, csv_path, proxy_path) = output_plan(&dir, true, true);

    let result = pipeline::run(&test_config(port), &members(&["127.0.0.1"]), &plan).await;

    assert!(matches!(result, Err(ScoutError::NoHosts)));
    assert!(!csv_path.exists());
    assert!(!proxy_path.exists());
}

#[tokio::test]
async fn test_empty_membership_is_no_hosts() {
    let dir = tempfile::tempdir().unwrap();
    let (plan, _, _) = output_plan(&dir, false, false);

    let result = pipeline::run(&test_config(11434), &members(&[]), &plan).await;
    assert!(matches!(result, Err(ScoutError::NoHosts)));
}

#[tokio::test]
async fn test_hosts_without_models() {
    let server = MockServer::start().await;
    tags_mock(&[]).mount(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let (plan, _, proxy_path) = output_plan(&dir, false, true);

    let result = pipeline::run(
        &test_config(server.address().port()),
        &members(&["127.0.0.1"]),
        &plan,
    )
    .await;

    assert!(matches!(result, Err(ScoutError::NoModels)));
    assert!(!proxy_path.exists());
}

#[tokio::test]
async fn test_proxy_only_skips_benchmarks() {
    let server = MockServer::start().await;
    tags_mock(&["llama3", "mistral"]).mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(wiremock::ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let port = server.address().port();
    let dir = tempfile::tempdir().unwrap();
    let (plan, csv_path, proxy_path) = output_plan(&dir, false, true);

    let report = pipeline::run(&test_config(port), &members(&["127.0.0.1"]), &plan)
        .await
        .unwrap();

    assert!(report.results.is_none());
    assert!(report.table.is_none());
    assert!(!csv_path.exists());

    let written: ProxyConfig =
        serde_json::from_str(&std::fs::read_to_string(&proxy_path).unwrap()).unwrap();
    assert_eq!(written.targets.len(), 1);
    assert_eq!(written.targets[0].url, format!("http://127.0.0.1:{}", port));
    assert_eq!(written.targets[0].models, vec!["llama3", "mistral"]);
}

#[tokio::test]
async fn test_all_failures_skip_csv() {
    let server = MockServer::start().await;
    tags_mock(&["llama3"]).mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let (plan, csv_path, _) = output_plan(&dir, true, false);

    let report = pipeline::run(
        &test_config(server.address().port()),
        &members(&["127.0.0.1"]),
        &plan,
    )
    .await
    .unwrap();

    assert_eq!(report.table.as_deref(), Some(&[][..]));
    assert_eq!(report.results.unwrap().len(), 1);
    assert!(!csv_path.exists());
}
