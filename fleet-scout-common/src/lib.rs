//! Fleet Scout Common Types
//!
//! Shared data model for the discovery, inventory, benchmark and routing stages,
//! plus the Ollama wire types the stages speak.

pub mod benchmark;
pub mod host;
pub mod ollama;
pub mod routing;

pub use benchmark::{mean_throughput, BenchmarkOutcome, BenchmarkResults, FailureKind, HostResults};
pub use host::{ActiveHost, ModelInventory, DEFAULT_OLLAMA_PORT};
pub use ollama::{GenerateOptions, GenerateRequest, GenerateResponse, TagsModel, TagsResponse};
pub use routing::{ProxyConfig, ProxyTarget, RoutingEntry, ROUTE_PREFIX};
