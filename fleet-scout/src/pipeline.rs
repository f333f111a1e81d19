//! One discovery → inventory → benchmark → routing cycle.

use std::path::PathBuf;

use fleet_scout_common::{BenchmarkResults, ModelInventory, ProxyConfig, RoutingEntry};
use reqwest::Client;

use crate::config::Config;
use crate::error::ScoutError;
use crate::export;
use crate::mesh::{self, MembershipSource};
use crate::{bench, inventory, probe, routing};

/// Which files to produce.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub routing_csv: Option<PathBuf>,
    pub proxy_json: Option<PathBuf>,
}

impl OutputPlan {
    /// Benchmark unless only a proxy config was asked for.
    ///
    /// With no outputs at all the routing table is still printed.
    pub fn should_benchmark(&self) -> bool {
        self.routing_csv.is_some() || self.proxy_json.is_none()
    }
}

/// Everything one run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub inventory: ModelInventory,
    pub proxy: Option<ProxyConfig>,
    pub results: Option<BenchmarkResults>,
    /// `None` when benchmarks were skipped; empty when every pair failed.
    pub table: Option<Vec<RoutingEntry>>,
}

/// Run the full pipeline once.
///
/// Fails with [`ScoutError::NoHosts`] or [`ScoutError::NoModels`] before
/// anything is written.
pub async fn run(
    config: &Config,
    source: &dyn MembershipSource,
    plan: &OutputPlan,
) -> Result<RunReport, ScoutError> {
    tracing::info!("Scanning mesh for active nodes...");
    let members = mesh::resolve(source).await;
    let hosts = probe::probe(members, &config.probe).await;
    if hosts.is_empty() {
        return Err(ScoutError::NoHosts);
    }

    tracing::info!("Inventorying {} hosts...", hosts.len());
    let http_client = Client::new();
    let inventory = inventory::inventory(hosts, &http_client, &config.inventory).await;
    if inventory.is_empty() {
        return Err(ScoutError::NoModels);
    }

    let mut report = RunReport {
        inventory,
        ..Default::default()
    };

    if let Some(path) = &plan.proxy_json {
        let proxy = routing::build_proxy_config(&report.inventory);
        export::write_proxy_config(path, &proxy)?;
        tracing::info!("Saved proxy config to: {}", path.display());
        report.proxy = Some(proxy);
    }

    if !plan.should_benchmark() {
        tracing::info!("Skipping benchmarks (proxy-only mode)");
        return Ok(report);
    }

    let results = bench::benchmark(&report.inventory, &http_client, &config.bench).await;
    let table = routing::build_table(&results);

    if table.is_empty() {
        tracing::warn!("Benchmarks completed but no successful results found");
    } else if let Some(path) = &plan.routing_csv {
        export::write_routing_csv(path, &table)?;
        tracing::info!("Saved routing table to: {}", path.display());
    }

    report.results = Some(results);
    report.table = Some(table);
    Ok(report)
}
