//! Routing table and proxy configuration builders. Pure functions, no I/O.

use std::cmp::Ordering;

use fleet_scout_common::{BenchmarkResults, ModelInventory, ProxyConfig, ProxyTarget, RoutingEntry};

/// Rank hosts per model by measured throughput.
///
/// Failed pairs are dropped. Entries are grouped by model (ascending) and the
/// fastest host comes first within each group. An empty table means no pair
/// produced a usable measurement.
pub fn build_table(results: &BenchmarkResults) -> Vec<RoutingEntry> {
    let mut entries: Vec<RoutingEntry> = results
        .iter()
        .flat_map(|(host, models)| {
            models.iter().filter_map(move |(model, outcome)| {
                outcome
                    .throughput()
                    .map(|tps| RoutingEntry::new(model, host.endpoint(), tps))
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.model
            .cmp(&b.model)
            .then_with(|| b.tps.partial_cmp(&a.tps).unwrap_or(Ordering::Equal))
            .then_with(|| a.endpoint.cmp(&b.endpoint))
    });
    entries
}

/// One proxy target per inventoried host, listing all of its models.
pub fn build_proxy_config(inventory: &ModelInventory) -> ProxyConfig {
    let targets = inventory
        .iter()
        .filter(|(_, models)| !models.is_empty())
        .map(|(host, models)| ProxyTarget {
            url: host.endpoint(),
            models: models.clone(),
        })
        .collect();

    ProxyConfig { targets }
}
