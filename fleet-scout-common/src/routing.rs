//! Routing table and proxy configuration types.

use serde::{Deserialize, Serialize};

/// Prefix of synthesized route names (`ollama/<model>`).
pub const ROUTE_PREFIX: &str = "ollama";

/// One ranked (model, host) recommendation.
///
/// Field order matches the exported column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingEntry {
    pub model: String,
    pub route: String,
    /// Endpoint URL of the host, e.g. `http://100.1.1.1:11434`.
    #[serde(rename = "ip")]
    pub endpoint: String,
    /// Measured tokens per second.
    pub tps: f64,
}

impl RoutingEntry {
    pub fn new(model: &str, endpoint: String, tps: f64) -> Self {
        Self {
            model: model.to_string(),
            route: format!("{}/{}", ROUTE_PREFIX, model),
            endpoint,
            tps,
        }
    }
}

/// Load-balancer target list: `{"targets": [{"url": ..., "models": [...]}]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub targets: Vec<ProxyTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyTarget {
    pub url: String,
    pub models: Vec<String>,
}
