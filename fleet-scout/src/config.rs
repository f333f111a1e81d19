//! Configuration for fleet-scout.

use std::path::Path;
use std::time::Duration;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use fleet_scout_common::{GenerateOptions, DEFAULT_OLLAMA_PORT};
use serde::Deserialize;

/// Main configuration structure.
///
/// One immutable value is built at startup and passed down to every stage.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mesh: MeshConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub bench: BenchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where member addresses come from.
#[derive(Debug, Clone, Deserialize)]
pub struct MeshConfig {
    /// Control-plane CLI queried with `status --json`.
    #[serde(default = "default_mesh_command")]
    pub command: String,
    /// Prefix of private mesh IPv4 addresses.
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,
    /// Explicit addresses to scan instead of querying the mesh.
    #[serde(default)]
    pub static_hosts: Vec<String>,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            command: default_mesh_command(),
            address_prefix: default_address_prefix(),
            static_hosts: vec![],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_probe_concurrency")]
    pub concurrency: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            timeout_ms: default_probe_timeout_ms(),
            concurrency: default_probe_concurrency(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_inventory_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_inventory_concurrency")]
    pub concurrency: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_inventory_timeout(),
            concurrency: default_inventory_concurrency(),
        }
    }
}

impl InventoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Benchmark protocol settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchConfig {
    /// Measured runs per model.
    #[serde(default = "default_runs")]
    pub runs: u32,
    /// Pause between models on the same host.
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: u64,
    /// Warm-up timeout, long enough for weights to load.
    #[serde(default = "default_load_timeout")]
    pub load_timeout_secs: u64,
    /// Timeout for each measured run.
    #[serde(default = "default_bench_timeout")]
    pub bench_timeout_secs: u64,
    /// Hosts benchmarked concurrently.
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_num_predict")]
    pub num_predict: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            cooldown_secs: default_cooldown(),
            load_timeout_secs: default_load_timeout(),
            bench_timeout_secs: default_bench_timeout(),
            workers: default_workers(),
            prompt: default_prompt(),
            num_predict: default_num_predict(),
            seed: default_seed(),
        }
    }
}

impl BenchConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }

    pub fn bench_timeout(&self) -> Duration {
        Duration::from_secs(self.bench_timeout_secs)
    }

    /// Fixed sampling parameters: zero temperature and a pinned seed.
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            num_predict: self.num_predict,
            temperature: 0.0,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_mesh_command() -> String {
    "tailscale".to_string()
}
fn default_address_prefix() -> String {
    "100.".to_string()
}
fn default_port() -> u16 {
    DEFAULT_OLLAMA_PORT
}
fn default_probe_timeout_ms() -> u64 {
    1000
}
fn default_probe_concurrency() -> usize {
    50
}
fn default_inventory_timeout() -> u64 {
    5
}
fn default_inventory_concurrency() -> usize {
    20
}
fn default_runs() -> u32 {
    3
}
fn default_cooldown() -> u64 {
    5
}
fn default_load_timeout() -> u64 {
    300
}
fn default_bench_timeout() -> u64 {
    60
}
fn default_workers() -> usize {
    10
}
fn default_prompt() -> String {
    "Write a paragraph about the history of the internet.".to_string()
}
fn default_num_predict() -> u32 {
    100
}
fn default_seed() -> u64 {
    42
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (FLEET_SCOUT__SECTION__KEY format)
    /// 2. The given file, or fleet-scout.toml if present
    /// 3. Built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name("fleet-scout").required(false),
        };

        let config = ConfigLoader::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("FLEET_SCOUT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("mesh.static_hosts")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would stall or skip a stage.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("bench.runs", self.bench.runs as usize),
            ("bench.workers", self.bench.workers),
            ("probe.concurrency", self.probe.concurrency),
            ("inventory.concurrency", self.inventory.concurrency),
        ];
        for (key, value) in checks {
            if value == 0 {
                return Err(ConfigError::Message(format!("{} must be at least 1", key)));
            }
        }
        Ok(())
    }
}
