//! Mesh membership lookup.
//!
//! Member addresses come from the Tailscale control plane (`tailscale status --json`)
//! or from an explicit host list.

use std::collections::{BTreeSet, HashMap};
use std::io::ErrorKind;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::config::MeshConfig;
use crate::error::{Error, Result};

/// A source of candidate member addresses.
#[async_trait]
pub trait MembershipSource: Send + Sync {
    /// Human-readable name for log lines.
    fn name(&self) -> &str;

    async fn members(&self) -> Result<BTreeSet<String>>;
}

/// Query the control plane, degrading to an empty set on any failure.
pub async fn resolve(source: &dyn MembershipSource) -> BTreeSet<String> {
    match source.members().await {
        Ok(members) => {
            tracing::info!("Resolved {} mesh members via {}", members.len(), source.name());
            members
        }
        Err(e) => {
            tracing::warn!("Failed to query mesh members via {}: {}", source.name(), e);
            BTreeSet::new()
        }
    }
}

/// Build the source described by the configuration.
pub fn source_from_config(config: &MeshConfig) -> Box<dyn MembershipSource> {
    if config.static_hosts.is_empty() {
        Box::new(TailscaleCli::new(&config.command, &config.address_prefix))
    } else {
        Box::new(StaticMembers::new(config.static_hosts.clone()))
    }
}

/// Membership from the `tailscale` CLI.
pub struct TailscaleCli {
    command: String,
    address_prefix: String,
}

impl TailscaleCli {
    pub fn new(command: &str, address_prefix: &str) -> Self {
        Self {
            command: command.to_string(),
            address_prefix: address_prefix.to_string(),
        }
    }
}

#[async_trait]
impl MembershipSource for TailscaleCli {
    fn name(&self) -> &str {
        &self.command
    }

    async fn members(&self) -> Result<BTreeSet<String>> {
        let output = Command::new(&self.command)
            .arg("status")
            .arg("--json")
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::ToolUnavailable(format!(
                    "'{}' command not found. Is it installed?",
                    self.command
                )),
                _ => Error::ToolUnavailable(e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ToolUnavailable(format!(
                "'{} status' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        parse_status(&output.stdout, &self.address_prefix)
    }
}

/// Membership from an explicit list of addresses, used verbatim.
pub struct StaticMembers {
    addresses: Vec<String>,
}

impl StaticMembers {
    pub fn new(addresses: Vec<String>) -> Self {
        Self { addresses }
    }
}

#[async_trait]
impl MembershipSource for StaticMembers {
    fn name(&self) -> &str {
        "static host list"
    }

    async fn members(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .addresses
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect())
    }
}

// Subset of `tailscale status --json`. Peer and address lists are null on
// a node without peers.
#[derive(Debug, Deserialize)]
struct TailscaleStatus {
    #[serde(rename = "Self", default)]
    self_node: Option<TailscaleNode>,
    #[serde(rename = "Peer", default)]
    peers: Option<HashMap<String, TailscaleNode>>,
}

#[derive(Debug, Deserialize)]
struct TailscaleNode {
    #[serde(rename = "TailscaleIPs", default)]
    tailscale_ips: Option<Vec<String>>,
}

/// Extract the private-mesh IPv4 addresses of this node and all peers.
fn parse_status(stdout: &[u8], address_prefix: &str) -> Result<BTreeSet<String>> {
    let status: TailscaleStatus =
        serde_json::from_slice(stdout).map_err(|e| Error::MalformedResponse(e.to_string()))?;

    let nodes = status
        .self_node
        .into_iter()
        .chain(status.peers.unwrap_or_default().into_values());

    Ok(nodes
        .flat_map(|node| node.tailscale_ips.unwrap_or_default())
        .filter(|ip| is_mesh_address(ip, address_prefix))
        .collect())
}

/// IPv4 (no colon) and inside the mesh's address range.
fn is_mesh_address(ip: &str, prefix: &str) -> bool {
    !ip.contains(':') && ip.starts_with(prefix)
}
