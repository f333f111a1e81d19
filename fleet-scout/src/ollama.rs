//! Ollama HTTP client used by the inventory and benchmark stages.

use std::time::Duration;

use fleet_scout_common::{GenerateRequest, GenerateResponse, TagsResponse};
use reqwest::{Client, Response};

use crate::error::{Error, Result};

/// Client for one Ollama server.
///
/// Every call takes an explicit timeout; none of them can block indefinitely.
#[derive(Clone)]
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Reuse an existing connection pool.
    pub fn with_client(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the models installed on the server, in the order it reports them.
    pub async fn list_models(&self, timeout: Duration) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(Error::from_http)?;

        let tags: TagsResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(Error::from_http)?;

        Ok(tags.model_names())
    }

    /// Send a generation request and wait for the body to be fully read.
    ///
    /// Used for warm-up, where only completion matters: any response that
    /// arrives in full counts, whatever its status. Only connection failures
    /// and timeouts are errors.
    pub async fn warm_up(&self, request: &GenerateRequest, timeout: Duration) -> Result<()> {
        let response = self.post_generate(request, timeout).await?;
        let status = response.status();
        response.bytes().await.map_err(Error::from_http)?;
        if !status.is_success() {
            tracing::debug!("Warm-up on {} answered {}", self.base_url, status);
        }
        Ok(())
    }

    /// Send a generation request and parse the timing fields of the response.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
        timeout: Duration,
    ) -> Result<GenerateResponse> {
        let response = self.post_generate(request, timeout).await?;
        check_status(response)
            .await?
            .json()
            .await
            .map_err(Error::from_http)
    }

    async fn post_generate(
        &self,
        request: &GenerateRequest,
        timeout: Duration,
    ) -> Result<Response> {
        let url = format!("{}/api/generate", self.base_url);

        tracing::debug!(
            "Sending generate request to Ollama: {} model={}",
            url,
            request.model
        );

        self.http_client
            .post(&url)
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(Error::from_http)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(Error::MalformedResponse(format!("Ollama returned {}: {}", status, body)))
}
