//! Fleet Scout - finds Ollama hosts on a Tailscale mesh, benchmarks every
//! (host, model) pair, and ranks hosts per model by measured throughput.

pub mod bench;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod inventory;
pub mod mesh;
pub mod ollama;
pub mod pipeline;
pub mod pool;
pub mod probe;
pub mod routing;

pub use crate::cli::Cli;
pub use crate::config::{BenchConfig, Config, InventoryConfig, MeshConfig, ProbeConfig};
pub use crate::error::{Error, Result, ScoutError};
pub use crate::mesh::{MembershipSource, StaticMembers, TailscaleCli};
pub use crate::ollama::OllamaClient;
pub use crate::pipeline::{OutputPlan, RunReport};
