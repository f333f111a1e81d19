//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::pipeline::OutputPlan;

/// Ollama Tailscale cluster discovery & benchmark tool
#[derive(Debug, Parser)]
#[command(name = "fleet-scout")]
#[command(about = "Discover Ollama hosts on a Tailscale mesh, benchmark them, and emit a routing table")]
#[command(version)]
pub struct Cli {
    /// Path to save the routing table (CSV)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to save a JSON target list for an Ollama proxy server
    #[arg(short, long, value_name = "FILE")]
    pub proxy: Option<PathBuf>,

    /// Number of benchmark runs per model [default: 3]
    #[arg(long)]
    pub runs: Option<u32>,

    /// Seconds to wait between models on the same host [default: 5]
    #[arg(long)]
    pub cooldown: Option<u64>,

    /// Seconds to wait for a model to load [default: 300]
    #[arg(long = "timeout-load")]
    pub timeout_load: Option<u64>,

    /// Seconds to wait for a measured generation [default: 60]
    #[arg(long = "timeout-bench")]
    pub timeout_bench: Option<u64>,

    /// Max concurrent hosts to benchmark [default: 10]
    #[arg(long)]
    pub workers: Option<usize>,

    /// Scan this address instead of querying Tailscale (repeatable)
    #[arg(long = "host", value_name = "ADDR")]
    pub hosts: Vec<String>,

    /// Ollama port to probe [default: 11434]
    #[arg(long)]
    pub port: Option<u16>,

    /// Configuration file (defaults to ./fleet-scout.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Overlay the flags that were given on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(runs) = self.runs {
            config.bench.runs = runs;
        }
        if let Some(cooldown) = self.cooldown {
            config.bench.cooldown_secs = cooldown;
        }
        if let Some(timeout) = self.timeout_load {
            config.bench.load_timeout_secs = timeout;
        }
        if let Some(timeout) = self.timeout_bench {
            config.bench.bench_timeout_secs = timeout;
        }
        if let Some(workers) = self.workers {
            config.bench.workers = workers;
        }
        if let Some(port) = self.port {
            config.probe.port = port;
        }
        if !self.hosts.is_empty() {
            config.mesh.static_hosts = self.hosts.clone();
        }
    }

    pub fn plan(&self) -> OutputPlan {
        OutputPlan {
            routing_csv: self.output.clone(),
            proxy_json: self.proxy.clone(),
        }
    }
}
