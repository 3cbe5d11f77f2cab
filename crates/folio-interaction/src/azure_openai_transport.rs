//! AzureOpenAiTransport - Direct REST transport for Azure OpenAI chat completions.
//!
//! The endpoint is the full deployment URL (including `api-version`); the
//! secret travels in the `api-key` header.

use async_trait::async_trait;
use folio_core::config::ProviderCredentials;
use folio_core::{CompletionFailure, FolioError};
use reqwest::Client;
use std::time::Duration;

use crate::transport::{CompletionTransport, ProviderRequest, TransportResponse};

/// Transport that posts provider requests with reqwest.
#[derive(Clone)]
pub struct AzureOpenAiTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl AzureOpenAiTransport {
    /// Creates a transport whose HTTP client gives up after `timeout`.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FolioError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FolioError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_credentials(
        credentials: ProviderCredentials<'_>,
        timeout: Duration,
    ) -> Result<Self, FolioError> {
        Self::new(credentials.endpoint, credentials.api_key, timeout)
    }
}

impl std::fmt::Debug for AzureOpenAiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiTransport")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CompletionTransport for AzureOpenAiTransport {
    async fn send(&self, request: &ProviderRequest) -> Result<TransportResponse, CompletionFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| {
                let reason = if err.is_timeout() {
                    "timed out"
                } else if err.is_connect() {
                    "connection failed"
                } else {
                    "request failed"
                };
                CompletionFailure::network(format!("Azure OpenAI {reason}: {err}"))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| {
            CompletionFailure::network(format!("Failed to read Azure OpenAI response: {err}"))
        })?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_api_key() {
        let transport = AzureOpenAiTransport::new(
            "https://example.openai.azure.com/openai/deployments/gpt/chat/completions",
            "top-secret",
            Duration::from_secs(5),
        )
        .unwrap();

        let rendered = format!("{:?}", transport);
        assert!(rendered.contains("example.openai.azure.com"));
        assert!(!rendered.contains("top-secret"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_failure() {
        // Port 9 (discard) on localhost is closed in test environments.
        let transport = AzureOpenAiTransport::new(
            "http://127.0.0.1:9/chat",
            "key",
            Duration::from_secs(2),
        )
        .unwrap();
        let request = ProviderRequest::new(Vec::new(), Default::default());

        let err = transport.send(&request).await.unwrap_err();
        assert!(matches!(err, CompletionFailure::Network(_)));
    }
}
