//! Ollama HTTP API types used for inventory and benchmarking.

use serde::{Deserialize, Serialize};

/// Response from the `/api/tags` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagsModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsModel {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

impl TagsResponse {
    /// Model names in the order the server listed them.
    pub fn model_names(self) -> Vec<String> {
        self.models.into_iter().map(|m| m.name).collect()
    }
}

/// Non-streaming request to `/api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerateOptions,
}

/// Sampling options pinned so that every run produces comparable work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub num_predict: u32,
    pub temperature: f32,
    pub seed: u64,
}

/// Fields of the `/api/generate` response needed to compute throughput.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub eval_count: Option<u64>,
    /// Generation time in nanoseconds.
    #[serde(default)]
    pub eval_duration: Option<u64>,
}

impl GenerateResponse {
    /// Tokens per second, or `None` when either field is missing or the
    /// reported duration is zero.
    pub fn tokens_per_second(&self) -> Option<f64> {
        let duration_ns = self.eval_duration.filter(|d| *d > 0)?;
        let count = self.eval_count?;
        Some(count as f64 / (duration_ns as f64 / 1e9))
    }
}
