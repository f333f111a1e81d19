//! Host identity types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Port the Ollama server listens on by default.
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;

/// A mesh member confirmed to have the inference port open.
///
/// Ordering is by address, then port, so maps keyed by host iterate
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActiveHost {
    pub address: String,
    pub port: u16,
}

impl ActiveHost {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// Base URL of the inference server on this host (e.g. `http://100.1.1.1:11434`).
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }
}

impl fmt::Display for ActiveHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// Models available on each active host, in the order the host reported them.
///
/// Hosts without models are never keys.
pub type ModelInventory = BTreeMap<ActiveHost, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_format() {
        let host = ActiveHost::new("100.1.1.1", DEFAULT_OLLAMA_PORT);
        assert_eq!(host.endpoint(), "http://100.1.1.1:11434");
        assert_eq!(host.to_string(), "100.1.1.1:11434");
    }

    #[test]
    fn test_hosts_order_by_address_then_port() {
        let mut hosts = vec![
            ActiveHost::new("100.1.1.2", 11434),
            ActiveHost::new("100.1.1.1", 9000),
            ActiveHost::new("100.1.1.1", 11434),
        ];
        hosts.sort();
        assert_eq!(hosts[0], ActiveHost::new("100.1.1.1", 9000));
        assert_eq!(hosts[1], ActiveHost::new("100.1.1.1", 11434));
        assert_eq!(hosts[2], ActiveHost::new("100.1.1.2", 11434));
    }
}
