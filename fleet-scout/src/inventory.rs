//! Model inventory across active hosts.

use fleet_scout_common::{ActiveHost, ModelInventory};
use reqwest::Client;

use crate::config::InventoryConfig;
use crate::ollama::OllamaClient;
use crate::pool::run_bounded;

/// Ask every host which models it has installed.
///
/// A host that cannot be queried counts as having no models; hosts with no
/// models are left out of the returned inventory.
pub async fn inventory<I>(
    hosts: I,
    http_client: &Client,
    config: &InventoryConfig,
) -> ModelInventory
where
    I: IntoIterator<Item = ActiveHost>,
{
    let timeout = config.timeout();

    let results = run_bounded(hosts, config.concurrency, |host| {
        let client = OllamaClient::with_client(http_client.clone(), &host.endpoint());
        async move {
            let models = match client.list_models(timeout).await {
                Ok(models) => models,
                Err(e) => {
                    tracing::debug!("Inventory of {} failed: {}", host, e);
                    Vec::new()
                }
            };
            (host, models)
        }
    })
    .await;

    let inventory: ModelInventory = results
        .into_iter()
        .filter(|(_, models)| !models.is_empty())
        .collect();

    tracing::info!(
        "Inventoried {} hosts with {} models in total",
        inventory.len(),
        inventory.values().map(Vec::len).sum::<usize>()
    );
    inventory
}
