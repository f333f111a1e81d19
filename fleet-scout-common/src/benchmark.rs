//! Benchmark outcome types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ActiveHost;

/// Why a (host, model) pair produced no throughput figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// The warm-up request could not connect or timed out; no measured runs were attempted.
    #[serde(rename = "Failed (Warmup)")]
    Warmup,
    /// Every measured run failed or reported a non-positive duration.
    #[serde(rename = "Failed")]
    NoSamples,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Warmup => write!(f, "Failed (Warmup)"),
            FailureKind::NoSamples => write!(f, "Failed"),
        }
    }
}

/// Result of benchmarking one model on one host.
///
/// Serializes as a bare number or the failure label, e.g. `42.17` or
/// `"Failed (Warmup)"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BenchmarkOutcome {
    /// Mean tokens per second, rounded to two decimal places.
    Throughput(f64),
    Failed(FailureKind),
}

impl BenchmarkOutcome {
    /// Aggregate collected samples into an outcome.
    pub fn from_samples(samples: &[f64]) -> Self {
        match mean_throughput(samples) {
            Some(tps) => BenchmarkOutcome::Throughput(tps),
            None => BenchmarkOutcome::Failed(FailureKind::NoSamples),
        }
    }

    pub fn throughput(&self) -> Option<f64> {
        match self {
            BenchmarkOutcome::Throughput(tps) => Some(*tps),
            BenchmarkOutcome::Failed(_) => None,
        }
    }
}

impl fmt::Display for BenchmarkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchmarkOutcome::Throughput(tps) => write!(f, "{:.2}", tps),
            BenchmarkOutcome::Failed(kind) => write!(f, "{}", kind),
        }
    }
}

/// Arithmetic mean of the samples rounded to two decimals, or `None` when empty.
pub fn mean_throughput(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

/// Outcomes for every model on a single host.
pub type HostResults = BTreeMap<String, BenchmarkOutcome>;

/// Outcomes for every (host, model) pair of an inventory.
pub type BenchmarkResults = BTreeMap<ActiveHost, HostResults>;
