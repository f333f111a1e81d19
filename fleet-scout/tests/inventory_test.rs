//! Integration tests for the inventory stage and the Ollama client.

mod common;

use std::time::Duration;

use fleet_scout::inventory::inventory;
use fleet_scout::{Error, InventoryConfig, OllamaClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{host_for, mock_ollama, tags_mock};

fn inventory_config() -> InventoryConfig {
    InventoryConfig {
        timeout_secs: 1,
        concurrency: 4,
    }
}

#[tokio::test]
async fn test_list_models_in_server_order() {
    let server = mock_ollama(&["qwen2.5:7b", "llama3:latest"]).await;
    let client = OllamaClient::new(&server.uri());

    let models = client.list_models(Duration::from_secs(1)).await.unwrap();
    assert_eq!(models, vec!["qwen2.5:7b", "llama3:latest"]);
}

#[tokio::test]
async fn test_list_models_error_kinds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(&server.uri());
    let result = client.list_models(Duration::from_secs(1)).await;
    assert!(matches!(result, Err(Error::MalformedResponse(_))));

    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&slow)
        .await;

    let client = OllamaClient::new(&slow.uri());
    let result = client.list_models(Duration::from_millis(200)).await;
    assert!(matches!(result, Err(Error::Timeout(_))));
}

#[tokio::test]
async fn test_hosts_without_models_are_dropped() {
    let with_models = mock_ollama(&["llama3"]).await;

    let empty = MockServer::start().await;
    tags_mock(&[]).mount(&empty).await;

    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&failing)
        .await;

    let hosts = vec![host_for(&with_models), host_for(&empty), host_for(&failing)];
    let inventory = inventory(hosts, &reqwest::Client::new(), &inventory_config()).await;

    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[&host_for(&with_models)], vec!["llama3"]);
    assert!(inventory.values().all(|models| !models.is_empty()));
}
